//! # User Data Transfer Objects Module
//!
//! 인증 및 사용자 프로필 API의 요청/응답 데이터 구조를 정의합니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── auth_request.rs    # 회원가입, 로그인, 비밀번호 변경
//! │   └── user_request.rs    # 프로필 수정
//! └── response/
//!     └── user_response.rs   # 사용자 정보, 인증 토큰 응답
//! ```
//!
//! 모든 JSON 필드는 camelCase를 사용합니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
