//! 저장되지 않는 도메인 모델 (인증 컨텍스트, 토큰 클레임)

pub mod auth;
pub mod token;
