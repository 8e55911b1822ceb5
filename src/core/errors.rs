//! # Application Error Handling System
//!
//! 스토어프론트 백엔드 전역에서 사용하는 통합 에러 타입입니다.
//! 서비스 계층은 `AppResult<T>`를 반환하고, 핸들러는 이를 그대로 `?`로 전파하면
//! `actix_web::ResponseError` 구현을 통해 적절한 HTTP 응답으로 변환됩니다.
//!
//! ## 에러 분류
//!
//! ### 1. 도메인 규칙 에러 (서비스 계층)
//! - `NotFound`: 사용자/주소/카테고리가 존재하지 않음
//! - `InvalidArgument`: 자기 자신을 부모로 지정, 존재하지 않는 부모, 순환 참조
//! - `ConflictError`: 하위 카테고리가 있는 카테고리 삭제, 이메일 중복, 동시 수정 충돌
//!
//! ### 2. 경계 계층 에러
//! - `ValidationError`: DTO 입력값 검증 실패
//! - `AuthenticationError` / `AuthorizationError`: 인증 실패, 권한 부족
//!
//! ### 3. 인프라 에러
//! - `DatabaseError`: 저장소 오류 (가공 없이 그대로 전파)
//! - `InternalError`: 예상하지 못한 시스템 오류
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status |
//! |----------|-------------|
//! | `ValidationError`, `InvalidArgument` | 400 Bad Request |
//! | `AuthenticationError` | 401 Unauthorized |
//! | `AuthorizationError` | 403 Forbidden |
//! | `NotFound` | 404 Not Found |
//! | `ConflictError` | 409 Conflict |
//! | `DatabaseError`, `InternalError` | 500 Internal Server Error |
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn delete_category(&self, id: i64) -> AppResult<bool> {
//!     if forest.has_children(id) {
//!         return Err(AppError::ConflictError(
//!             "하위 카테고리가 있는 카테고리는 삭제할 수 없습니다".to_string()
//!         ));
//!     }
//!     // ...
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 모든 변형은 사람이 읽을 수 있는 메시지를 담고 있으며,
/// 응답 본문은 `{"error": "<메시지>"}` 형식입니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500)
    ///
    /// MongoDB 연산 실패, 트랜잭션 중단 등 저장소에서 발생한 오류입니다.
    /// 서비스 계층은 이 에러를 감추지 않고 그대로 전파합니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400)
    ///
    /// `validator` 기반 DTO 검증 실패 시 사용됩니다.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 잘못된 인자 에러 (400)
    ///
    /// 형식은 올바르지만 현재 저장소 상태에 비추어 허용되지 않는 요청입니다.
    /// 예: 존재하지 않는 부모 카테고리, 자기 자신 또는 자손을 부모로 지정
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 리소스 찾을 수 없음 에러 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌 에러 (409)
    ///
    /// 하위 카테고리가 남아 있는 카테고리 삭제, 이메일 중복,
    /// 재시도 한도를 넘긴 동시 수정 충돌 등에 사용됩니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
