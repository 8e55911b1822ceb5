//! Users Entity Module
//!
//! 사용자와 사용자가 소유하는 1:1 리소스(장바구니, 위시리스트)를 정의합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::{User, Cart, Wishlist};
//!
//! let user = User::new_customer(id, name, email, password_hash);
//! let cart = Cart::for_user(cart_id, user.id);
//! let wishlist = Wishlist::for_user(wishlist_id, user.id);
//! ```

pub mod user;
pub mod cart;

pub use user::User;
pub use cart::{Cart, Wishlist};
