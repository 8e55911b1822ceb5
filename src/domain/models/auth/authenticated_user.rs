use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::config::Role;
use crate::core::errors::{AppError, AppResult};

/// 인증 미들웨어가 요청 extensions에 저장하는 사용자 정보
///
/// 핸들러 인자로 선언하면 `FromRequest`로 추출됩니다.
/// 미들웨어를 거치지 않은 요청에서는 401을 반환합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 본인이거나 관리자인 경우에만 대상 사용자의 리소스에 접근할 수 있습니다.
    pub fn can_access_user(&self, user_id: i64) -> bool {
        self.user_id == user_id || self.is_admin()
    }

    pub fn ensure_can_access_user(&self, user_id: i64) -> AppResult<()> {
        if self.can_access_user(user_id) {
            Ok(())
        } else {
            log::warn!("권한 부족: 사용자 {}가 사용자 {}의 리소스에 접근 시도", self.user_id, user_id);
            Err(AppError::AuthorizationError("다른 사용자의 리소스에 접근할 수 없습니다".to_string()))
        }
    }

    pub fn ensure_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::AuthorizationError("관리자 권한이 필요합니다".to_string()))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string()
            ).into())),
        }
    }
}
