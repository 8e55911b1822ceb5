//! 사용자 저장소
//!
//! 사용자는 장바구니, 위시리스트, 주소를 소유합니다.
//! 생성([`UserStore::create_with_cart_and_wishlist`])과 삭제([`UserStore::delete_cascade`])는
//! 소유 리소스까지 하나의 트랜잭션으로 처리합니다.

pub mod user_repo;

use async_trait::async_trait;
use crate::core::errors::AppResult;
use crate::domain::entities::users::User;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn next_user_id(&self) -> AppResult<i64>;

    /// 사용자와 장바구니, 위시리스트를 함께 생성합니다.
    ///
    /// 같은 이메일(대소문자 무시)의 사용자가 이미 있으면 `ConflictError`.
    async fn create_with_cart_and_wishlist(&self, user: User) -> AppResult<User>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// 대소문자를 구분하지 않고 이메일로 조회합니다.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 프로필 필드(이름, 이메일, 역할, 연락처, 비밀번호 해시)를 갱신합니다.
    ///
    /// 주소록 버전은 건드리지 않습니다. 다른 사용자와 이메일이 겹치면 `ConflictError`.
    async fn update_profile(&self, user: &User) -> AppResult<bool>;

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<bool>;

    /// 사용자와 주소, 장바구니, 위시리스트를 함께 삭제합니다.
    async fn delete_cascade(&self, id: i64) -> AppResult<bool>;
}
