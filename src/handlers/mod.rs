//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - MongoDB / 메모리 저장소          ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 핸들러는 서비스를 `web::Data<...Service>`로 주입받고, 인증된 사용자는
//! `AuthenticatedUser` 추출자로 받습니다. 입력은 `payload.validate()?`로 검증하며,
//! 모든 에러는 `AppError`로 전파되어 `{"error": "..."}` 응답이 됩니다.
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_address(
//!     caller: AuthenticatedUser,
//!     user_id: web::Path<i64>,
//!     payload: web::Json<AddressRequest>,
//!     address_service: web::Data<AddressService>,
//! ) -> Result<HttpResponse, AppError> {
//!     caller.ensure_can_access_user(*user_id)?;
//!     payload.validate()?;
//!     let created = address_service.create(*user_id, payload.into_inner()).await?;
//!     Ok(HttpResponse::Created().json(created))
//! }
//! ```
//!
//! ## 모듈 구성
//! - **`auth`**: 회원가입, 로그인, 비밀번호 변경
//! - **`users`**: 프로필 조회/수정, 사용자 삭제
//! - **`addresses`**: 사용자별 주소록
//! - **`categories`**: 카테고리 트리

pub mod users;
pub mod auth;
pub mod addresses;
pub mod categories;
