use serde::{Deserialize, Serialize};
use crate::config::Role;

/// HS256 액세스 토큰 클레임
///
/// `sub`는 사용자 ID의 문자열 표현입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}
