//! # Core Module
//!
//! 애플리케이션 전역에서 공유하는 핵심 타입을 제공합니다.
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 상태 코드 자동 매핑
//! - **ErrorContext**: 외부 에러에 컨텍스트를 붙여 `AppError`로 변환
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn get_category_handler(
//!     service: web::Data<CategoryService>,
//!     id: web::Path<i64>,
//! ) -> Result<HttpResponse, AppError> {
//!     let category = service.get(id.into_inner()).await?;
//!     Ok(HttpResponse::Ok().json(category))
//! }
//! ```

pub mod errors;

pub use errors::*;
