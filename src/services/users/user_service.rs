//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 비밀번호 검증, 프로필 조회/수정, 계정 삭제를 담당합니다.
//!
//! ## 보안 설계
//!
//! - **bcrypt 해싱**: 환경별 cost (`PasswordConfig::bcrypt_cost`)
//! - **중복 방지**: 이메일은 대소문자를 구분하지 않고 유일
//! - **일관된 실패 메시지**: 로그인 실패 원인(이메일 없음/비밀번호 불일치)을 구분하지 않음
//! - **민감 정보 제거**: 응답은 항상 `UserResponse`로 변환

use std::sync::Arc;
use bcrypt::{hash, verify};
use crate::{
    config::Role,
    core::errors::{AppError, AppResult},
    domain::{
        dto::users::{
            request::{ChangePasswordRequest, RegisterRequest, UpdateUserRequest},
            response::UserResponse,
        },
        entities::users::User,
        models::auth::AuthenticatedUser,
    },
    repositories::users::UserStore,
};

fn invalid_credentials() -> AppError {
    AppError::AuthenticationError("이메일 또는 비밀번호가 올바르지 않습니다".to_string())
}

fn user_not_found() -> AppError {
    AppError::NotFound("사용자를 찾을 수 없습니다".to_string())
}

/// 사용자 관리 비즈니스 로직 서비스
pub struct UserService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let hash_start = std::time::Instant::now();
        let password_hash = hash(password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        Ok(password_hash)
    }

    /// 회원가입
    ///
    /// 사용자와 함께 빈 장바구니, 위시리스트를 생성합니다. 역할은 항상 `Customer`입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 사용 중인 이메일 (대소문자 무시)
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        let start_time = std::time::Instant::now();

        if self.users.find_by_email(&request.email).await?.is_some() {
            log::debug!("회원가입 거부 (중복 이메일): {}", request.email);
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let id = self.users.next_user_id().await?;

        let mut user = User::new_customer(id, request.name, request.email, password_hash);
        user.phone = request.phone;
        user.date_of_birth = request.date_of_birth;
        user.gender = request.gender;

        let created = self.users.create_with_cart_and_wishlist(user).await?;

        log::info!("회원가입 완료: id={}, email={} ({:?})", created.id, created.email, start_time.elapsed());

        Ok(created)
    }

    /// 이메일과 비밀번호로 사용자를 인증합니다.
    pub async fn verify_password(&self, email: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.users.find_by_email(email).await? else {
            log::debug!("로그인 실패 (등록되지 않은 이메일): {}", email);
            return Err(invalid_credentials());
        };

        let is_valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !is_valid {
            log::debug!("로그인 실패 (비밀번호 불일치): user_id={}", user.id);
            return Err(invalid_credentials());
        }

        log::info!("로그인 성공: user_id={}", user.id);

        Ok(user)
    }

    /// 현재 비밀번호를 확인한 뒤 새 비밀번호로 변경합니다.
    pub async fn change_password(&self, user_id: i64, request: ChangePasswordRequest) -> AppResult<()> {
        let user = self.users.find_by_id(user_id).await?.ok_or_else(user_not_found)?;

        let is_valid = verify(&request.current_password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !is_valid {
            return Err(AppError::ValidationError("현재 비밀번호가 올바르지 않습니다".to_string()));
        }

        let password_hash = self.hash_password(&request.new_password)?;

        if !self.users.update_password(user_id, &password_hash).await? {
            return Err(user_not_found());
        }

        log::info!("비밀번호 변경: user_id={}", user_id);

        Ok(())
    }

    pub async fn get_user(&self, id: i64) -> AppResult<UserResponse> {
        self.users
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(user_not_found)
    }

    /// 프로필을 수정합니다.
    ///
    /// 역할 변경은 관리자만 할 수 있으며, `password`가 있으면 비밀번호도 함께 변경합니다.
    pub async fn update_user(
        &self,
        caller: &AuthenticatedUser,
        id: i64,
        request: UpdateUserRequest,
    ) -> AppResult<UserResponse> {
        caller.ensure_can_access_user(id)?;

        let mut user = self.users.find_by_id(id).await?.ok_or_else(user_not_found)?;

        if let Some(role) = request.role {
            if role != user.role {
                caller.ensure_admin()?;
                log::info!("역할 변경: user_id={}, {} -> {} (by {})", id, user.role, role, caller.user_id);
                user.role = role;
            }
        }

        if let Some(password) = request.password.as_deref() {
            user.password_hash = self.hash_password(password)?;
        }

        user.name = request.name;
        user.set_email(request.email);
        user.phone = request.phone;
        user.date_of_birth = request.date_of_birth;
        user.gender = request.gender;

        if !self.users.update_profile(&user).await? {
            return Err(user_not_found());
        }

        log::info!("프로필 수정: user_id={}", id);

        Ok(UserResponse::from(user))
    }

    /// 사용자와 주소, 장바구니, 위시리스트를 삭제합니다.
    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        if !self.users.delete_cascade(id).await? {
            return Err(user_not_found());
        }

        log::warn!("사용자 삭제: user_id={}", id);

        Ok(())
    }

    /// 관리자 계정을 보장합니다. 같은 이메일의 사용자가 있으면 역할만 `Admin`으로 올립니다.
    pub async fn ensure_admin_account(&self, name: &str, email: &str, password: &str) -> AppResult<User> {
        if let Some(mut existing) = self.users.find_by_email(email).await? {
            if existing.role != Role::Admin {
                existing.role = Role::Admin;
                self.users.update_profile(&existing).await?;
                log::info!("관리자 권한 부여: user_id={}", existing.id);
            }
            return Ok(existing);
        }

        let password_hash = self.hash_password(password)?;
        let id = self.users.next_user_id().await?;

        let mut admin = User::new_customer(id, name.to_string(), email.to_string(), password_hash);
        admin.role = Role::Admin;

        let created = self.users.create_with_cart_and_wishlist(admin).await?;
        log::info!("관리자 계정 생성: user_id={}, email={}", created.id, created.email);

        Ok(created)
    }
}
