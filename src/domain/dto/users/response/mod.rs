//! # 사용자 관련 응답 DTO 모듈
//!
//! 민감한 정보(비밀번호 해시, 내부 버전)는 응답에서 제외합니다.
//!
//! ```json
//! {
//!   "token": "eyJhbGciOiJIUzI1NiIs...",
//!   "tokenType": "Bearer",
//!   "expiresIn": 86400,
//!   "user": {
//!     "id": 1,
//!     "name": "Asha",
//!     "email": "asha@example.com",
//!     "role": "Customer",
//!     "phone": null,
//!     "dateOfBirth": null,
//!     "gender": null,
//!     "createdAt": "2024-06-01T10:00:00Z"
//!   }
//! }
//! ```

pub mod user_response;

pub use user_response::{UserResponse, AuthResponse};
