//! Authentication HTTP Handlers
//!
//! 회원가입, 로그인, 비밀번호 변경 엔드포인트입니다.
//! 회원가입과 로그인은 HS256 JWT 액세스 토큰을 발급합니다.
//!
//! - `POST /api/auth/register`
//! - `POST /api/auth/login`
//! - `POST /api/auth/change-password` (인증 필요)
use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::{
        dto::users::{
            request::{ChangePasswordRequest, LoginRequest, RegisterRequest},
            response::AuthResponse,
        },
        entities::users::User,
        models::auth::AuthenticatedUser,
    },
    services::{auth::TokenService, users::UserService},
};

fn issue_token(token_service: &TokenService, user: User) -> Result<AuthResponse, AppError> {
    let token = token_service.generate_access_token(&user).map_err(|e| {
        log::error!("토큰 생성 실패 - 사용자 ID: {}, 에러: {}", user.id, e);
        e
    })?;

    Ok(AuthResponse::new(user, token, token_service.expires_in_seconds()))
}

/// 회원가입 핸들러
///
/// 사용자와 빈 장바구니, 위시리스트를 만들고 바로 로그인 상태의 토큰을 반환합니다.
#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = user_service.register(payload.into_inner()).await?;
    let response = issue_token(&token_service, user)?;

    Ok(HttpResponse::Created().json(response))
}

/// 로컬 로그인 핸들러
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    user_service: web::Data<UserService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = user_service
        .verify_password(&payload.email, &payload.password)
        .await?;

    let response = issue_token(&token_service, user)?;

    Ok(HttpResponse::Ok().json(response))
}

/// 비밀번호 변경 핸들러
#[post("/change-password")]
pub async fn change_password(
    caller: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    user_service
        .change_password(caller.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
