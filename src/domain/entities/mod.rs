//! Domain Entities
//!
//! 저장소에 그대로 저장되는 문서 타입들입니다.
//! 모든 엔티티는 `counters` 컬렉션에서 발급한 정수 ID를 `_id`로 사용합니다.
//!
//! | 엔티티 | 컬렉션 | 소유 관계 |
//! |--------|--------|-----------|
//! | [`users::User`] | `users` | - |
//! | [`users::Cart`] | `carts` | User 1:1 |
//! | [`users::Wishlist`] | `wishlists` | User 1:1 |
//! | [`addresses::Address`] | `addresses` | User 1:N |
//! | [`categories::Category`] | `categories` | 자기 참조 트리 |
//! | [`products::Product`] | `products` | Category N:1 (nullable) |

pub mod users;
pub mod addresses;
pub mod categories;
pub mod products;

pub use users::*;
pub use addresses::*;
pub use categories::*;
pub use products::*;
