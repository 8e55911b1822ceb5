use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    ClientSession, IndexModel,
};
use crate::{
    core::errors::AppResult,
    db::{bson_to_i64, collections, finish_versioned, version_condition, Database},
    domain::entities::addresses::Address,
};
use super::{AddressSnapshot, AddressStore, AddressWrite};

/// MongoDB 주소록 리포지토리
///
/// 주소는 `addresses` 컬렉션에, 주소록 버전은 `users` 문서의 `address_version` 필드에 저장됩니다.
pub struct AddressRepository {
    db: Arc<Database>,
}

impl AddressRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "_id": 1 })
            .options(IndexOptions::builder()
                .name("user_id_id".to_string())
                .build())
            .build();

        self.db.collection::<Address>(collections::ADDRESSES)
            .create_index(user_index)
            .await?;

        Ok(())
    }

    async fn apply_writes(
        &self,
        session: &mut ClientSession,
        user_id: i64,
        expected_version: i64,
        writes: Vec<AddressWrite>,
    ) -> Result<bool, mongodb::error::Error> {
        let bumped = self.db.collection::<Document>(collections::USERS)
            .update_one(
                doc! { "_id": user_id, "address_version": version_condition(expected_version) },
                doc! { "$inc": { "address_version": 1_i64 } },
            )
            .session(&mut *session)
            .await?;

        if bumped.matched_count == 0 {
            return Ok(false);
        }

        let addresses = self.db.collection::<Address>(collections::ADDRESSES);
        for write in writes {
            match write {
                AddressWrite::Upsert(address) => {
                    addresses
                        .replace_one(doc! { "_id": address.id, "user_id": user_id }, &address)
                        .upsert(true)
                        .session(&mut *session)
                        .await?;
                }
                AddressWrite::Remove(address_id) => {
                    addresses
                        .delete_one(doc! { "_id": address_id, "user_id": user_id })
                        .session(&mut *session)
                        .await?;
                }
            }
        }

        Ok(true)
    }
}

#[async_trait]
impl AddressStore for AddressRepository {
    async fn load(&self, user_id: i64) -> AppResult<Option<AddressSnapshot>> {
        // 버전을 먼저 읽어야 이후 변경된 주소를 본 경우에도 커밋이 버전 검사에서 걸립니다.
        let user = self.db.collection::<Document>(collections::USERS)
            .find_one(doc! { "_id": user_id })
            .projection(doc! { "address_version": 1 })
            .await?;

        let Some(user) = user else {
            return Ok(None);
        };
        let version = bson_to_i64(user.get("address_version")).unwrap_or(0);

        let addresses: Vec<Address> = self.db.collection::<Address>(collections::ADDRESSES)
            .find(doc! { "user_id": user_id })
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(Some(AddressSnapshot { version, addresses }))
    }

    async fn next_address_id(&self) -> AppResult<i64> {
        self.db.next_sequence(collections::ADDRESSES).await
    }

    async fn commit(&self, user_id: i64, expected_version: i64, writes: Vec<AddressWrite>) -> AppResult<bool> {
        let mut session = self.db.begin().await?;
        let outcome = self.apply_writes(&mut session, user_id, expected_version, writes).await;
        finish_versioned(&mut session, outcome).await
    }
}
