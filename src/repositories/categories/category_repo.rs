use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::IndexOptions,
    ClientSession, IndexModel,
};
use crate::{
    core::errors::AppResult,
    db::{bson_to_i64, collections, finish_versioned, version_condition, Database},
    domain::entities::{categories::Category, products::Product},
};
use super::{CategorySnapshot, CategoryStore, CategoryWrite};

const FOREST_META_ID: &str = "categories";

/// MongoDB 카테고리 리포지토리
///
/// 포리스트 버전은 `meta` 컬렉션의 `{ _id: "categories", version }` 문서에 저장됩니다.
pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let parent_index = IndexModel::builder()
            .keys(doc! { "parent_category_id": 1 })
            .options(IndexOptions::builder()
                .name("parent_category_id".to_string())
                .build())
            .build();

        let product_category_index = IndexModel::builder()
            .keys(doc! { "category_id": 1 })
            .options(IndexOptions::builder()
                .name("category_id".to_string())
                .build())
            .build();

        self.db.collection::<Category>(collections::CATEGORIES)
            .create_index(parent_index)
            .await?;

        self.db.collection::<Product>(collections::PRODUCTS)
            .create_index(product_category_index)
            .await?;

        self.forest_version().await?;

        Ok(())
    }

    /// 포리스트 버전 문서를 읽고, 없으면 버전 0으로 생성합니다.
    async fn forest_version(&self) -> AppResult<i64> {
        let metas = self.db.collection::<Document>(collections::META);

        if let Some(meta) = metas.find_one(doc! { "_id": FOREST_META_ID }).await? {
            return Ok(bson_to_i64(meta.get("version")).unwrap_or(0));
        }

        metas
            .update_one(
                doc! { "_id": FOREST_META_ID },
                doc! { "$setOnInsert": { "version": 0_i64 } },
            )
            .upsert(true)
            .await?;

        Ok(0)
    }

    async fn product_counts(&self) -> AppResult<HashMap<i64, u64>> {
        let pipeline = vec![
            doc! { "$match": { "category_id": { "$ne": Bson::Null } } },
            doc! { "$group": { "_id": "$category_id", "count": { "$sum": 1 } } },
        ];

        let groups: Vec<Document> = self.db.collection::<Product>(collections::PRODUCTS)
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        let counts = groups
            .iter()
            .filter_map(|group| {
                let category_id = bson_to_i64(group.get("_id"))?;
                let count = bson_to_i64(group.get("count"))?;
                Some((category_id, u64::try_from(count).unwrap_or(0)))
            })
            .collect();

        Ok(counts)
    }

    async fn apply_writes(
        &self,
        session: &mut ClientSession,
        expected_version: i64,
        writes: Vec<CategoryWrite>,
    ) -> Result<bool, mongodb::error::Error> {
        let bumped = self.db.collection::<Document>(collections::META)
            .update_one(
                doc! { "_id": FOREST_META_ID, "version": version_condition(expected_version) },
                doc! { "$inc": { "version": 1_i64 } },
            )
            .session(&mut *session)
            .await?;

        if bumped.matched_count == 0 {
            return Ok(false);
        }

        let categories = self.db.collection::<Category>(collections::CATEGORIES);
        let products = self.db.collection::<Product>(collections::PRODUCTS);

        for write in writes {
            match write {
                CategoryWrite::Upsert(category) => {
                    categories
                        .replace_one(doc! { "_id": category.id }, &category)
                        .upsert(true)
                        .session(&mut *session)
                        .await?;
                }
                CategoryWrite::Remove(category_id) => {
                    products
                        .update_many(
                            doc! { "category_id": category_id },
                            doc! { "$set": { "category_id": Bson::Null } },
                        )
                        .session(&mut *session)
                        .await?;

                    categories
                        .delete_one(doc! { "_id": category_id })
                        .session(&mut *session)
                        .await?;
                }
            }
        }

        Ok(true)
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn load_forest(&self) -> AppResult<CategorySnapshot> {
        let version = self.forest_version().await?;

        let categories: Vec<Category> = self.db.collection::<Category>(collections::CATEGORIES)
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;

        let product_counts = self.product_counts().await?;

        Ok(CategorySnapshot { version, categories, product_counts })
    }

    async fn next_category_id(&self) -> AppResult<i64> {
        self.db.next_sequence(collections::CATEGORIES).await
    }

    async fn commit(&self, expected_version: i64, writes: Vec<CategoryWrite>) -> AppResult<bool> {
        let mut session = self.db.begin().await?;
        let outcome = self.apply_writes(&mut session, expected_version, writes).await;
        finish_versioned(&mut session, outcome).await
    }
}
