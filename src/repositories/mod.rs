//! # Repositories
//!
//! 서비스 계층이 의존하는 저장소 trait과 두 가지 구현을 제공합니다.
//!
//! | trait | MongoDB 구현 | 메모리 구현 |
//! |-------|--------------|-------------|
//! | [`users::UserStore`] | [`users::user_repo::UserRepository`] | [`memory::MemoryStore`] |
//! | [`addresses::AddressStore`] | [`addresses::address_repo::AddressRepository`] | [`memory::MemoryStore`] |
//! | [`categories::CategoryStore`] | [`categories::category_repo::CategoryRepository`] | [`memory::MemoryStore`] |
//!
//! 서비스는 `Arc<dyn ...Store>`만 알고 있으며, 어떤 구현을 쓸지는 `main`에서
//! `STORE_BACKEND` 환경 변수로 결정합니다.

pub mod users;
pub mod addresses;
pub mod categories;
pub mod memory;
