//! 주소록 서비스
//!
//! 모든 변경은 "스냅샷 읽기 → [`AddressBook`] 로직 → 버전 조건부 커밋" 순서로 처리합니다.
//! 그 사이 같은 사용자의 주소록이 바뀌었으면 처음부터 다시 시도하고,
//! [`MAX_COMMIT_ATTEMPTS`]번 모두 실패하면 `ConflictError`를 반환합니다.

use std::sync::Arc;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::addresses::{AddressRequest, AddressResponse};
use crate::repositories::addresses::AddressStore;
use crate::services::MAX_COMMIT_ATTEMPTS;
use super::address_book::AddressBook;

pub struct AddressService {
    store: Arc<dyn AddressStore>,
}

fn address_not_found() -> AppError {
    AppError::NotFound("주소를 찾을 수 없습니다".to_string())
}

fn user_not_found() -> AppError {
    AppError::NotFound("사용자를 찾을 수 없습니다".to_string())
}

impl AddressService {
    pub fn new(store: Arc<dyn AddressStore>) -> Self {
        Self { store }
    }

    /// 사용자의 주소 목록 (ID 오름차순). 사용자가 없으면 빈 목록입니다.
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<AddressResponse>> {
        let addresses = self.store
            .load(user_id)
            .await?
            .map(|snapshot| snapshot.addresses)
            .unwrap_or_default();

        Ok(addresses.into_iter().map(AddressResponse::from).collect())
    }

    /// 다른 사용자의 주소는 존재하지 않는 것으로 취급합니다.
    pub async fn get(&self, user_id: i64, address_id: i64) -> AppResult<AddressResponse> {
        let snapshot = self.store.load(user_id).await?.ok_or_else(address_not_found)?;

        snapshot.addresses
            .into_iter()
            .find(|a| a.id == address_id && a.user_id == user_id)
            .map(AddressResponse::from)
            .ok_or_else(address_not_found)
    }

    pub async fn create(&self, user_id: i64, request: AddressRequest) -> AppResult<AddressResponse> {
        let address_id = self.store.next_address_id().await?;

        let created = self
            .mutate(user_id, |book| Ok(book.add(address_id, request.clone())))
            .await?
            .ok_or_else(user_not_found)?;

        log::info!(
            "주소 생성: user_id={}, address_id={}, is_default={}",
            user_id, created.id, created.is_default
        );

        Ok(created.into())
    }

    pub async fn update(&self, user_id: i64, address_id: i64, request: AddressRequest) -> AppResult<AddressResponse> {
        let updated = self
            .mutate(user_id, |book| {
                book.revise(address_id, request.clone()).ok_or_else(address_not_found)
            })
            .await?
            .ok_or_else(address_not_found)?;

        log::info!("주소 수정: user_id={}, address_id={}", user_id, address_id);

        Ok(updated.into())
    }

    /// 주소를 삭제합니다. 없는 주소면 `false`.
    pub async fn delete(&self, user_id: i64, address_id: i64) -> AppResult<bool> {
        let deleted = self
            .mutate(user_id, |book| Ok(book.remove(address_id)))
            .await?
            .unwrap_or(false);

        if deleted {
            log::info!("주소 삭제: user_id={}, address_id={}", user_id, address_id);
        }

        Ok(deleted)
    }

    pub async fn set_default(&self, user_id: i64, address_id: i64) -> AppResult<AddressResponse> {
        let updated = self
            .mutate(user_id, |book| book.make_default(address_id).ok_or_else(address_not_found))
            .await?
            .ok_or_else(address_not_found)?;

        log::info!("기본 주소 변경: user_id={}, address_id={}", user_id, address_id);

        Ok(updated.into())
    }

    /// 주소록 스냅샷에 `apply`를 적용하고 커밋합니다.
    ///
    /// 사용자가 없으면 `Ok(None)`. 변경이 없으면 커밋하지 않습니다.
    async fn mutate<T, F>(&self, user_id: i64, mut apply: F) -> AppResult<Option<T>>
    where
        F: FnMut(&mut AddressBook) -> AppResult<T>,
    {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let Some(snapshot) = self.store.load(user_id).await? else {
                return Ok(None);
            };

            let mut book = AddressBook::new(user_id, snapshot.addresses);
            let outcome = apply(&mut book)?;

            let writes = book.into_writes();
            if writes.is_empty() {
                return Ok(Some(outcome));
            }

            if self.store.commit(user_id, snapshot.version, writes).await? {
                return Ok(Some(outcome));
            }

            log::warn!(
                "주소록 버전 충돌: user_id={}, version={}, attempt={}/{}",
                user_id, snapshot.version, attempt, MAX_COMMIT_ATTEMPTS
            );
        }

        Err(AppError::ConflictError(
            "주소록이 동시에 수정되어 변경을 적용하지 못했습니다. 다시 시도해 주세요".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use crate::domain::dto::addresses::address_request::sample_request;
    use crate::domain::entities::users::User;
    use crate::repositories::addresses::{AddressSnapshot, AddressWrite};
    use crate::repositories::memory::MemoryStore;
    use crate::repositories::users::UserStore;

    async fn setup() -> (Arc<MemoryStore>, AddressService, i64) {
        let store = Arc::new(MemoryStore::new());
        let id = store.next_user_id().await.unwrap();
        store
            .create_with_cart_and_wishlist(User::new_customer(id, "Asha".into(), "asha@example.com".into(), "hash".into()))
            .await
            .unwrap();

        let service = AddressService::new(store.clone());
        (store, service, id)
    }

    async fn default_ids(service: &AddressService, user_id: i64) -> Vec<i64> {
        service.list(user_id).await.unwrap()
            .into_iter()
            .filter(|a| a.is_default)
            .map(|a| a.id)
            .collect()
    }

    #[actix_web::test]
    async fn test_first_address_becomes_default() {
        let (_, service, user_id) = setup().await;

        let created = service.create(user_id, sample_request("Home", false)).await.unwrap();

        assert!(created.is_default);
        assert_eq!(created.user_id, user_id);
    }

    #[actix_web::test]
    async fn test_create_default_moves_flag() {
        let (_, service, user_id) = setup().await;

        let home = service.create(user_id, sample_request("Home", true)).await.unwrap();
        let office = service.create(user_id, sample_request("Office", true)).await.unwrap();

        assert_eq!(default_ids(&service, user_id).await, vec![office.id]);
        assert!(!service.get(user_id, home.id).await.unwrap().is_default);
    }

    #[actix_web::test]
    async fn test_create_for_missing_user_is_not_found() {
        let (_, service, _) = setup().await;

        let result = service.create(404, sample_request("Home", false)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_addresses_are_scoped_by_user() {
        let (store, service, user_id) = setup().await;
        let other_id = store.next_user_id().await.unwrap();
        store
            .create_with_cart_and_wishlist(User::new_customer(other_id, "Ravi".into(), "ravi@example.com".into(), "hash".into()))
            .await
            .unwrap();

        let mine = service.create(user_id, sample_request("Home", false)).await.unwrap();

        assert!(matches!(service.get(other_id, mine.id).await, Err(AppError::NotFound(_))));
        assert!(!service.delete(other_id, mine.id).await.unwrap());
        assert!(matches!(service.set_default(other_id, mine.id).await, Err(AppError::NotFound(_))));
        assert!(service.list(other_id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_update_unsetting_default_hands_over() {
        let (_, service, user_id) = setup().await;
        let home = service.create(user_id, sample_request("Home", true)).await.unwrap();
        let office = service.create(user_id, sample_request("Office", false)).await.unwrap();

        let updated = service.update(user_id, home.id, sample_request("Home", false)).await.unwrap();

        assert!(!updated.is_default);
        assert_eq!(default_ids(&service, user_id).await, vec![office.id]);
    }

    #[actix_web::test]
    async fn test_update_missing_address_is_not_found() {
        let (_, service, user_id) = setup().await;

        let result = service.update(user_id, 77, sample_request("Home", true)).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_delete_default_promotes_lowest_remaining() {
        let (_, service, user_id) = setup().await;
        let home = service.create(user_id, sample_request("Home", false)).await.unwrap();
        let office = service.create(user_id, sample_request("Office", false)).await.unwrap();
        let parents = service.create(user_id, sample_request("Parents", true)).await.unwrap();

        assert!(service.delete(user_id, parents.id).await.unwrap());

        assert_eq!(default_ids(&service, user_id).await, vec![home.id]);
        assert_eq!(service.list(user_id).await.unwrap().len(), 2);
        assert!(!service.get(user_id, office.id).await.unwrap().is_default);
    }

    #[actix_web::test]
    async fn test_delete_missing_address_returns_false() {
        let (_, service, user_id) = setup().await;
        assert!(!service.delete(user_id, 5).await.unwrap());
    }

    #[actix_web::test]
    async fn test_set_default() {
        let (_, service, user_id) = setup().await;
        service.create(user_id, sample_request("Home", false)).await.unwrap();
        let office = service.create(user_id, sample_request("Office", false)).await.unwrap();

        let updated = service.set_default(user_id, office.id).await.unwrap();

        assert!(updated.is_default);
        assert_eq!(default_ids(&service, user_id).await, vec![office.id]);
    }

    /// 읽은 뒤 다른 작업에 실행을 양보해서 커밋 경합을 만드는 저장소
    struct InterleavingStore {
        inner: Arc<MemoryStore>,
        stale_commits: AtomicUsize,
    }

    #[async_trait]
    impl AddressStore for InterleavingStore {
        async fn load(&self, user_id: i64) -> AppResult<Option<AddressSnapshot>> {
            let snapshot = self.inner.load(user_id).await;
            actix_web::rt::task::yield_now().await;
            snapshot
        }

        async fn next_address_id(&self) -> AppResult<i64> {
            self.inner.next_address_id().await
        }

        async fn commit(&self, user_id: i64, expected_version: i64, writes: Vec<AddressWrite>) -> AppResult<bool> {
            let committed = AddressStore::commit(self.inner.as_ref(), user_id, expected_version, writes).await?;
            if !committed {
                self.stale_commits.fetch_add(1, Ordering::SeqCst);
            }
            Ok(committed)
        }
    }

    #[actix_web::test]
    async fn test_concurrent_default_changes_keep_single_default() {
        let (store, service, user_id) = setup().await;
        service.create(user_id, sample_request("Home", true)).await.unwrap();
        let mut ids = Vec::new();
        for name in ["Office", "Parents", "Gym"] {
            ids.push(service.create(user_id, sample_request(name, false)).await.unwrap().id);
        }

        let interleaving = Arc::new(InterleavingStore { inner: store, stale_commits: AtomicUsize::new(0) });
        let service = Arc::new(AddressService::new(interleaving.clone()));

        let tasks: Vec<_> = ids
            .iter()
            .map(|id| {
                let service = service.clone();
                let id = *id;
                actix_web::rt::spawn(async move { service.set_default(user_id, id).await })
            })
            .collect();

        for task in tasks {
            let result = task.await.unwrap();
            assert!(result.is_ok(), "set_default failed: {:?}", result.err());
        }

        assert!(interleaving.stale_commits.load(Ordering::SeqCst) >= 1);

        let defaults = default_ids(&service, user_id).await;
        assert_eq!(defaults.len(), 1);
        assert!(ids.contains(&defaults[0]));
    }

    /// 커밋이 항상 버전 충돌로 실패하는 저장소
    struct AlwaysStale {
        inner: MemoryStore,
        commits: AtomicUsize,
    }

    #[async_trait]
    impl AddressStore for AlwaysStale {
        async fn load(&self, user_id: i64) -> AppResult<Option<AddressSnapshot>> {
            self.inner.load(user_id).await
        }

        async fn next_address_id(&self) -> AppResult<i64> {
            self.inner.next_address_id().await
        }

        async fn commit(&self, _: i64, _: i64, _: Vec<AddressWrite>) -> AppResult<bool> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    #[actix_web::test]
    async fn test_gives_up_after_max_attempts() {
        let inner = MemoryStore::new();
        let id = inner.next_user_id().await.unwrap();
        inner
            .create_with_cart_and_wishlist(User::new_customer(id, "Asha".into(), "asha@example.com".into(), "hash".into()))
            .await
            .unwrap();

        let store = Arc::new(AlwaysStale { inner, commits: AtomicUsize::new(0) });
        let service = AddressService::new(store.clone());

        let result = service.create(id, sample_request("Home", false)).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(store.commits.load(Ordering::SeqCst), MAX_COMMIT_ATTEMPTS);
    }
}
