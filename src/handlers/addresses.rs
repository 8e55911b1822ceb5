//! # Address Book HTTP Handlers
//!
//! `/users/{user_id}/addresses` 아래의 주소록 엔드포인트입니다.
//! 본인 또는 관리자만 접근할 수 있습니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `` | 주소 목록 | 200 OK |
//! | `POST` | `` | 주소 생성 | 201 Created |
//! | `GET` | `/{id}` | 주소 조회 | 200 OK |
//! | `PUT` | `/{id}` | 주소 수정 | 200 OK |
//! | `DELETE` | `/{id}` | 주소 삭제 | 204 No Content |
//! | `PATCH` | `/{id}/default` | 기본 주소 지정 | 200 OK |
use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::{dto::addresses::AddressRequest, models::auth::AuthenticatedUser},
    services::addresses::AddressService,
};

#[get("")]
pub async fn list_addresses(
    caller: AuthenticatedUser,
    user_id: web::Path<i64>,
    address_service: web::Data<AddressService>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id.into_inner();
    caller.ensure_can_access_user(user_id)?;

    let addresses = address_service.list(user_id).await?;
    Ok(HttpResponse::Ok().json(addresses))
}

#[get("/{address_id}")]
pub async fn get_address(
    caller: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
    address_service: web::Data<AddressService>,
) -> Result<HttpResponse, AppError> {
    let (user_id, address_id) = path.into_inner();
    caller.ensure_can_access_user(user_id)?;

    let address = address_service.get(user_id, address_id).await?;
    Ok(HttpResponse::Ok().json(address))
}

/// 주소 생성 핸들러
///
/// 첫 주소이거나 `isDefault: true`이면 기본 주소가 됩니다.
#[post("")]
pub async fn create_address(
    caller: AuthenticatedUser,
    user_id: web::Path<i64>,
    payload: web::Json<AddressRequest>,
    address_service: web::Data<AddressService>,
) -> Result<HttpResponse, AppError> {
    let user_id = user_id.into_inner();
    caller.ensure_can_access_user(user_id)?;
    payload.validate()?;

    let created = address_service.create(user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

#[put("/{address_id}")]
pub async fn update_address(
    caller: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
    payload: web::Json<AddressRequest>,
    address_service: web::Data<AddressService>,
) -> Result<HttpResponse, AppError> {
    let (user_id, address_id) = path.into_inner();
    caller.ensure_can_access_user(user_id)?;
    payload.validate()?;

    let updated = address_service
        .update(user_id, address_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/{address_id}")]
pub async fn delete_address(
    caller: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
    address_service: web::Data<AddressService>,
) -> Result<HttpResponse, AppError> {
    let (user_id, address_id) = path.into_inner();
    caller.ensure_can_access_user(user_id)?;

    if !address_service.delete(user_id, address_id).await? {
        return Err(AppError::NotFound("주소를 찾을 수 없습니다".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}

#[patch("/{address_id}/default")]
pub async fn set_default_address(
    caller: AuthenticatedUser,
    path: web::Path<(i64, i64)>,
    address_service: web::Data<AddressService>,
) -> Result<HttpResponse, AppError> {
    let (user_id, address_id) = path.into_inner();
    caller.ensure_can_access_user(user_id)?;

    let updated = address_service.set_default(user_id, address_id).await?;
    Ok(HttpResponse::Ok().json(updated))
}
