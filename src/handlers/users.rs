//! # User Management HTTP Handlers
//!
//! 사용자 프로필 조회, 수정, 삭제 엔드포인트입니다. 모든 엔드포인트는 인증이 필요합니다.
//!
//! | 메서드 | 경로 | 설명 | 권한 | 상태 코드 |
//! |--------|------|------|------|-----------|
//! | `GET` | `/users/me` | 내 프로필 | 본인 | 200 OK |
//! | `GET` | `/users/{id}` | 사용자 조회 | 본인 또는 관리자 | 200 OK |
//! | `PUT` | `/users/{id}` | 프로필 수정 | 본인 또는 관리자 | 200 OK |
//! | `DELETE` | `/users/{id}` | 사용자 삭제 | 관리자 | 204 No Content |
//!
//! 역할(`role`) 변경은 관리자만 가능하며, 삭제 시 주소, 장바구니, 위시리스트도 함께 삭제됩니다.
use actix_web::{delete, get, put, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::{dto::users::request::UpdateUserRequest, models::auth::AuthenticatedUser},
    services::users::UserService,
};

/// 내 프로필 조회 핸들러
#[get("/me")]
pub async fn get_me(
    caller: AuthenticatedUser,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let user = user_service.get_user(caller.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// 사용자 조회 핸들러
#[get("/{user_id}")]
pub async fn get_user(
    caller: AuthenticatedUser,
    user_id: web::Path<i64>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id.into_inner();
    caller.ensure_can_access_user(user_id)?;

    let user = user_service.get_user(user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// 프로필 수정 핸들러
#[put("/{user_id}")]
pub async fn update_user(
    caller: AuthenticatedUser,
    user_id: web::Path<i64>,
    payload: web::Json<UpdateUserRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let updated = user_service
        .update_user(&caller, user_id.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// 사용자 삭제 핸들러 (관리자 전용)
#[delete("/{user_id}")]
pub async fn delete_user(
    caller: AuthenticatedUser,
    user_id: web::Path<i64>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    caller.ensure_admin()?;

    let user_id = user_id.into_inner();
    user_service.delete_user(user_id).await?;

    log::info!("사용자 삭제 요청 처리: user_id={} (by {})", user_id, caller.user_id);

    Ok(HttpResponse::NoContent().finish())
}
