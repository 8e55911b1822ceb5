//! 프로세스 내 메모리 저장소
//!
//! `STORE_BACKEND=memory`로 MongoDB 없이 서버를 실행하거나 테스트에서 사용합니다.
//! 세 저장소 trait을 하나의 `RwLock` 뒤에서 구현하므로,
//! 커밋 하나는 쓰기 잠금 하나 안에서 원자적으로 적용됩니다.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use async_trait::async_trait;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::entities::{
    addresses::Address,
    categories::Category,
    products::Product,
    users::{Cart, User, Wishlist},
};
use super::addresses::{AddressSnapshot, AddressStore, AddressWrite};
use super::categories::{CategorySnapshot, CategoryStore, CategoryWrite};
use super::users::UserStore;

#[derive(Default)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    carts: BTreeMap<i64, Cart>,
    wishlists: BTreeMap<i64, Wishlist>,
    addresses: BTreeMap<i64, Address>,
    categories: BTreeMap<i64, Category>,
    products: BTreeMap<i64, Product>,
    category_version: i64,
    sequences: HashMap<&'static str, i64>,
}

impl MemoryState {
    fn next_id(&mut self, name: &'static str) -> i64 {
        let seq = self.sequences.entry(name).or_insert(0);
        *seq += 1;
        *seq
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, MemoryState>> {
        self.state.read().context("메모리 저장소 읽기 잠금 실패")
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state.write().context("메모리 저장소 쓰기 잠금 실패")
    }

    /// 상품을 추가합니다. 상품 관리 API가 없으므로 개발용 시드와 테스트에서 사용합니다.
    pub fn insert_product(&self, name: &str, category_id: Option<i64>) -> AppResult<Product> {
        let mut state = self.write()?;
        let product = Product {
            id: state.next_id("products"),
            name: name.to_string(),
            category_id,
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    pub fn product(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    pub fn cart_for_user(&self, user_id: i64) -> AppResult<Option<Cart>> {
        Ok(self.read()?.carts.values().find(|c| c.user_id == user_id).cloned())
    }

    pub fn wishlist_for_user(&self, user_id: i64) -> AppResult<Option<Wishlist>> {
        Ok(self.read()?.wishlists.values().find(|w| w.user_id == user_id).cloned())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn next_user_id(&self) -> AppResult<i64> {
        Ok(self.write()?.next_id("users"))
    }

    async fn create_with_cart_and_wishlist(&self, user: User) -> AppResult<User> {
        let mut state = self.write()?;

        if state.users.values().any(|u| u.email_lower == user.email_lower) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let cart = Cart::for_user(state.next_id("carts"), user.id);
        let wishlist = Wishlist::for_user(state.next_id("wishlists"), user.id);

        state.carts.insert(cart.id, cart);
        state.wishlists.insert(wishlist.id, wishlist);
        state.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email_lower = email.to_lowercase();
        Ok(self.read()?
            .users
            .values()
            .find(|u| u.email_lower == email_lower)
            .cloned())
    }

    async fn update_profile(&self, user: &User) -> AppResult<bool> {
        let mut state = self.write()?;

        if state.users.values().any(|u| u.id != user.id && u.email_lower == user.email_lower) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let Some(stored) = state.users.get_mut(&user.id) else {
            return Ok(false);
        };

        let address_version = stored.address_version;
        *stored = User { address_version, ..user.clone() };

        Ok(true)
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> AppResult<bool> {
        let mut state = self.write()?;

        match state.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_cascade(&self, id: i64) -> AppResult<bool> {
        let mut state = self.write()?;

        if state.users.remove(&id).is_none() {
            return Ok(false);
        }

        state.addresses.retain(|_, a| a.user_id != id);
        state.carts.retain(|_, c| c.user_id != id);
        state.wishlists.retain(|_, w| w.user_id != id);

        Ok(true)
    }
}

#[async_trait]
impl AddressStore for MemoryStore {
    async fn load(&self, user_id: i64) -> AppResult<Option<AddressSnapshot>> {
        let state = self.read()?;

        let Some(user) = state.users.get(&user_id) else {
            return Ok(None);
        };

        let addresses = state.addresses
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();

        Ok(Some(AddressSnapshot { version: user.address_version, addresses }))
    }

    async fn next_address_id(&self) -> AppResult<i64> {
        Ok(self.write()?.next_id("addresses"))
    }

    async fn commit(&self, user_id: i64, expected_version: i64, writes: Vec<AddressWrite>) -> AppResult<bool> {
        let mut state = self.write()?;

        match state.users.get_mut(&user_id) {
            Some(user) if user.address_version == expected_version => user.address_version += 1,
            _ => return Ok(false),
        }

        for write in writes {
            match write {
                AddressWrite::Upsert(address) => {
                    state.addresses.insert(address.id, address);
                }
                AddressWrite::Remove(address_id) => {
                    if state.addresses.get(&address_id).is_some_and(|a| a.user_id == user_id) {
                        state.addresses.remove(&address_id);
                    }
                }
            }
        }

        Ok(true)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn load_forest(&self) -> AppResult<CategorySnapshot> {
        let state = self.read()?;

        let mut product_counts = HashMap::new();
        for category_id in state.products.values().filter_map(|p| p.category_id) {
            *product_counts.entry(category_id).or_insert(0) += 1;
        }

        Ok(CategorySnapshot {
            version: state.category_version,
            categories: state.categories.values().cloned().collect(),
            product_counts,
        })
    }

    async fn next_category_id(&self) -> AppResult<i64> {
        Ok(self.write()?.next_id("categories"))
    }

    async fn commit(&self, expected_version: i64, writes: Vec<CategoryWrite>) -> AppResult<bool> {
        let mut state = self.write()?;

        if state.category_version != expected_version {
            return Ok(false);
        }
        state.category_version += 1;

        for write in writes {
            match write {
                CategoryWrite::Upsert(category) => {
                    state.categories.insert(category.id, category);
                }
                CategoryWrite::Remove(category_id) => {
                    state.categories.remove(&category_id);
                    for product in state.products.values_mut() {
                        if product.category_id == Some(category_id) {
                            product.category_id = None;
                        }
                    }
                }
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: i64, user_id: i64, is_default: bool) -> Address {
        Address {
            id,
            user_id,
            name: format!("Address {}", id),
            address_line1: "12 MG Road".into(),
            address_line2: None,
            city: "Pune".into(),
            state: "MH".into(),
            postal_code: "411001".into(),
            country: "India".into(),
            phone: "9876543210".into(),
            is_default,
        }
    }

    async fn registered_user(store: &MemoryStore, email: &str) -> User {
        let id = store.next_user_id().await.unwrap();
        store
            .create_with_cart_and_wishlist(User::new_customer(id, "Asha".into(), email.into(), "hash".into()))
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_register_creates_cart_and_wishlist() {
        let store = MemoryStore::new();
        let user = registered_user(&store, "asha@example.com").await;

        assert_eq!(store.cart_for_user(user.id).unwrap().map(|c| c.user_id), Some(user.id));
        assert_eq!(store.wishlist_for_user(user.id).unwrap().map(|w| w.user_id), Some(user.id));
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_conflict_regardless_of_case() {
        let store = MemoryStore::new();
        registered_user(&store, "asha@example.com").await;

        let duplicate = User::new_customer(99, "Other".into(), "ASHA@example.com".into(), "hash".into());
        let result = store.create_with_cart_and_wishlist(duplicate).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert!(store.find_by_email("Asha@Example.com").await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_address_commit_rejects_stale_version() {
        let store = MemoryStore::new();
        let user = registered_user(&store, "asha@example.com").await;

        let snapshot = store.load(user.id).await.unwrap().unwrap();
        assert_eq!(snapshot.version, 0);

        let first = AddressStore::commit(&store, user.id, 0, vec![AddressWrite::Upsert(address(1, user.id, true))]).await.unwrap();
        let stale = AddressStore::commit(&store, user.id, 0, vec![AddressWrite::Upsert(address(2, user.id, true))]).await.unwrap();

        assert!(first);
        assert!(!stale);

        let snapshot = store.load(user.id).await.unwrap().unwrap();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.addresses, vec![address(1, user.id, true)]);
    }

    #[actix_web::test]
    async fn test_profile_update_keeps_address_version() {
        let store = MemoryStore::new();
        let user = registered_user(&store, "asha@example.com").await;
        AddressStore::commit(&store, user.id, 0, vec![AddressWrite::Upsert(address(1, user.id, true))]).await.unwrap();

        let mut stale_copy = user.clone();
        stale_copy.name = "Asha K".into();
        assert!(store.update_profile(&stale_copy).await.unwrap());

        let stored = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Asha K");
        assert_eq!(stored.address_version, 1);
    }

    #[actix_web::test]
    async fn test_delete_cascade_removes_owned_records() {
        let store = MemoryStore::new();
        let user = registered_user(&store, "asha@example.com").await;
        AddressStore::commit(&store, user.id, 0, vec![AddressWrite::Upsert(address(1, user.id, true))]).await.unwrap();

        assert!(store.delete_cascade(user.id).await.unwrap());
        assert!(!store.delete_cascade(user.id).await.unwrap());

        assert!(store.load(user.id).await.unwrap().is_none());
        assert!(store.cart_for_user(user.id).unwrap().is_none());
        assert!(store.wishlist_for_user(user.id).unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_category_remove_unlinks_products() {
        let store = MemoryStore::new();
        let category = Category { id: 1, name: "Men".into(), description: String::new(), parent_category_id: None };
        assert!(CategoryStore::commit(&store, 0, vec![CategoryWrite::Upsert(category)]).await.unwrap());

        let product = store.insert_product("Shirt", Some(1)).unwrap();
        let snapshot = store.load_forest().await.unwrap();
        assert_eq!(snapshot.product_counts.get(&1), Some(&1));

        assert!(CategoryStore::commit(&store, 1, vec![CategoryWrite::Remove(1)]).await.unwrap());

        assert_eq!(store.product(product.id).unwrap().unwrap().category_id, None);
        assert!(store.load_forest().await.unwrap().categories.is_empty());
    }
}
