//! # Category HTTP Handlers
//!
//! 조회는 누구나 가능하고, 생성/수정/삭제는 관리자만 가능합니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `?name=&page=&pageSize=` | 목록 (이름 필터, 페이징) | 200 |
//! | `GET` | `/hierarchy` | 전체 계층 | 200 |
//! | `GET` | `/root` | 루트 카테고리 | 200 |
//! | `GET` | `/{id}` | 단건 조회 | 200 / 404 |
//! | `GET` | `/{id}/subcategories` | 직계 하위 카테고리 | 200 |
//! | `POST` | `` | 생성 | 201 / 400 |
//! | `PUT` | `/{id}` | 수정 | 204 / 400 / 404 |
//! | `DELETE` | `/{id}` | 삭제 | 204 / 404 / 409 |
//!
//! `/hierarchy`, `/root`는 `/{id}`보다 먼저 등록해야 합니다.
use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::{
        dto::categories::{CategoryListQuery, CategoryRequest},
        models::auth::AuthenticatedUser,
    },
    services::categories::CategoryService,
};

fn category_not_found() -> AppError {
    AppError::NotFound("카테고리를 찾을 수 없습니다".to_string())
}

#[get("")]
pub async fn list_categories(
    query: web::Query<CategoryListQuery>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let categories = category_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/hierarchy")]
pub async fn category_hierarchy(
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let tree = category_service.hierarchy().await?;
    Ok(HttpResponse::Ok().json(tree))
}

#[get("/root")]
pub async fn root_categories(
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let roots = category_service.root_categories().await?;
    Ok(HttpResponse::Ok().json(roots))
}

#[get("/{category_id}")]
pub async fn get_category(
    category_id: web::Path<i64>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let category = category_service.get(category_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

#[get("/{category_id}/subcategories")]
pub async fn sub_categories(
    category_id: web::Path<i64>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    let children = category_service.sub_categories(category_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(children))
}

#[post("")]
pub async fn create_category(
    caller: AuthenticatedUser,
    payload: web::Json<CategoryRequest>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    caller.ensure_admin()?;
    payload.validate()?;

    let created = category_service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

#[put("/{category_id}")]
pub async fn update_category(
    caller: AuthenticatedUser,
    category_id: web::Path<i64>,
    payload: web::Json<CategoryRequest>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    caller.ensure_admin()?;
    payload.validate()?;

    if !category_service.update(category_id.into_inner(), payload.into_inner()).await? {
        return Err(category_not_found());
    }

    Ok(HttpResponse::NoContent().finish())
}

#[delete("/{category_id}")]
pub async fn delete_category(
    caller: AuthenticatedUser,
    category_id: web::Path<i64>,
    category_service: web::Data<CategoryService>,
) -> Result<HttpResponse, AppError> {
    caller.ensure_admin()?;

    if !category_service.delete(category_id.into_inner()).await? {
        return Err(category_not_found());
    }

    Ok(HttpResponse::NoContent().finish())
}
