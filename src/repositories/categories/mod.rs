//! 카테고리 저장소
//!
//! 카테고리 포리스트 전체를 한 번에 읽고, 변경은 포리스트 버전 조건부 트랜잭션으로 커밋합니다.
//! 포리스트 크기가 작다는 전제에서 모든 조회(목록, 단건, 루트, 하위, 계층)는
//! 스냅샷 하나로 메모리에서 계산합니다.

pub mod category_repo;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::errors::AppResult;
use crate::domain::entities::categories::Category;

/// 카테고리 포리스트 스냅샷
#[derive(Debug, Clone, Default)]
pub struct CategorySnapshot {
    pub version: i64,
    /// ID 오름차순
    pub categories: Vec<Category>,
    /// 카테고리 ID별 직접 연결된 상품 수 (상품이 없는 카테고리는 항목 없음)
    pub product_counts: HashMap<i64, u64>,
}

/// 커밋할 카테고리 변경
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryWrite {
    Upsert(Category),
    /// 카테고리를 삭제하고 연결된 상품의 `category_id`를 비웁니다.
    Remove(i64),
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn load_forest(&self) -> AppResult<CategorySnapshot>;

    async fn next_category_id(&self) -> AppResult<i64>;

    /// 포리스트 버전이 `expected_version`과 같을 때만 적용합니다. 다르면 `Ok(false)`.
    async fn commit(&self, expected_version: i64, writes: Vec<CategoryWrite>) -> AppResult<bool>;
}
