use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;
use crate::config::Role;
use crate::utils::string_utils::deserialize_optional_string;
use super::auth_request::validate_optional_phone;

/// 프로필 수정 요청
///
/// `role` 변경은 관리자만 가능하며, `password`는 값이 있을 때만 갱신합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100, message = "이름은 2-100자 사이여야 합니다"))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[serde(default)]
    pub role: Option<Role>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: Option<String>,

    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub gender: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다"))]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_user_request_parses_role() {
        let req: UpdateUserRequest = serde_json::from_str(
            r#"{"name":"Asha","email":"asha@example.com","role":"Admin"}"#,
        ).unwrap();

        assert_eq!(req.role, Some(Role::Admin));
        assert!(req.password.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_user_request_rejects_short_password() {
        let req: UpdateUserRequest = serde_json::from_str(
            r#"{"name":"Asha","email":"asha@example.com","password":"abc"}"#,
        ).unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_user_request_rejects_unknown_role() {
        let parsed = serde_json::from_str::<UpdateUserRequest>(
            r#"{"name":"Asha","email":"asha@example.com","role":"Owner"}"#,
        );
        assert!(parsed.is_err());
    }
}
