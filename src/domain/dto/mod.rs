//! Data Transfer Objects
//!
//! HTTP 경계에서 사용하는 요청/응답 타입입니다.
//! 요청 DTO는 `validator::Validate`를 구현하며, 핸들러가 서비스 호출 전에 검증합니다.

pub mod users;
pub mod addresses;
pub mod categories;

pub use users::*;
pub use addresses::*;
pub use categories::*;
