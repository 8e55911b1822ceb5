//! # 사용자 관련 요청 DTO 모듈
//!
//! 클라이언트로부터 받은 JSON 본문을 구조화된 타입으로 변환하고 `validator`로 검증합니다.
//! 검증 실패는 핸들러에서 `AppError::ValidationError`(400)로 변환됩니다.
//!
//! - [`RegisterRequest`] - 회원가입
//! - [`LoginRequest`] - 로그인
//! - [`ChangePasswordRequest`] - 비밀번호 변경
//! - [`UpdateUserRequest`] - 프로필 수정

pub mod auth_request;
pub mod user_request;

pub use auth_request::{RegisterRequest, LoginRequest, ChangePasswordRequest};
pub use user_request::UpdateUserRequest;
