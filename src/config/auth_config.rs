//! 인증 관련 설정
//!
//! JWT 서명 키와 만료 시간, 그리고 토큰과 사용자 문서에 저장되는 역할(`Role`)을 정의합니다.

use std::env;
use std::fmt;

/// JWT 토큰 설정
pub struct JwtConfig;

impl JwtConfig {
    /// HS256 서명에 사용하는 비밀 키
    ///
    /// 설정되지 않은 경우 개발용 기본값을 사용하며 경고를 남깁니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 액세스 토큰 만료 시간 (시간 단위, 기본 24)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }
}

/// 시작 시 생성할 관리자 계정 설정
///
/// `ADMIN_EMAIL`과 `ADMIN_PASSWORD`가 모두 설정된 경우에만 사용됩니다.
pub struct AdminSeedConfig;

impl AdminSeedConfig {
    /// (이름, 이메일, 비밀번호)
    pub fn credentials() -> Option<(String, String, String)> {
        let email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.trim().is_empty())?;
        let password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty())?;
        let name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());

        Some((name, email, password))
    }
}

/// 사용자 역할
///
/// 직렬화 형식은 `"Customer"` / `"Admin"` 입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

impl Role {
    /// 문자열에서 역할을 파싱합니다. 대소문자를 구분하지 않습니다.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unsupported role: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_string() {
        assert_eq!(Role::from_str("Customer").unwrap(), Role::Customer);
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("ADMIN").unwrap(), Role::Admin);

        assert!(Role::from_str("moderator").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        let parsed: Role = serde_json::from_str("\"Customer\"").unwrap();
        assert_eq!(parsed, Role::Customer);
    }

    #[test]
    fn test_default_role_is_customer() {
        assert_eq!(Role::default(), Role::Customer);
    }
}
