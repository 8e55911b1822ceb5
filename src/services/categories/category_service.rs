//! 카테고리 서비스
//!
//! 조회는 포리스트 스냅샷 하나로 계산하고, 변경은 포리스트 버전 조건부로 커밋합니다.
//! 검증(부모 존재, 순환, 하위 카테고리 유무)과 커밋 사이에 다른 변경이 끼어들면
//! 새 스냅샷으로 다시 검증합니다.

use std::sync::Arc;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::categories::{
    CategoryHierarchyResponse, CategoryListQuery, CategoryRequest, CategoryResponse,
};
use crate::domain::entities::categories::Category;
use crate::repositories::categories::{CategoryStore, CategoryWrite};
use crate::services::MAX_COMMIT_ATTEMPTS;
use super::category_forest::CategoryForest;

pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

fn category_conflict() -> AppError {
    AppError::ConflictError(
        "카테고리가 동시에 수정되어 변경을 적용하지 못했습니다. 다시 시도해 주세요".to_string(),
    )
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    async fn forest(&self) -> AppResult<(i64, CategoryForest)> {
        let snapshot = self.store.load_forest().await?;
        Ok((snapshot.version, CategoryForest::from(snapshot)))
    }

    pub async fn list(&self, query: &CategoryListQuery) -> AppResult<Vec<CategoryResponse>> {
        let (_, forest) = self.forest().await?;
        Ok(forest.list(query.name_filter(), query.page(), query.page_size()))
    }

    pub async fn get(&self, id: i64) -> AppResult<CategoryResponse> {
        let (_, forest) = self.forest().await?;
        forest
            .view(id)
            .ok_or_else(|| AppError::NotFound("카테고리를 찾을 수 없습니다".to_string()))
    }

    pub async fn hierarchy(&self) -> AppResult<Vec<CategoryHierarchyResponse>> {
        let (_, forest) = self.forest().await?;
        Ok(forest.hierarchy())
    }

    pub async fn root_categories(&self) -> AppResult<Vec<CategoryResponse>> {
        let (_, forest) = self.forest().await?;
        Ok(forest.roots())
    }

    pub async fn sub_categories(&self, parent_id: i64) -> AppResult<Vec<CategoryResponse>> {
        let (_, forest) = self.forest().await?;
        Ok(forest.sub_categories(parent_id))
    }

    pub async fn create(&self, request: CategoryRequest) -> AppResult<CategoryResponse> {
        let mut allocated_id = None;

        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let (version, forest) = self.forest().await?;
            forest.validate_new_parent(request.parent_category_id)?;

            let id = match allocated_id {
                Some(id) => id,
                None => {
                    let id = self.store.next_category_id().await?;
                    allocated_id = Some(id);
                    id
                }
            };

            let category = Category {
                id,
                name: request.name.clone(),
                description: request.description.clone(),
                parent_category_id: request.parent_category_id,
            };

            if self.store.commit(version, vec![CategoryWrite::Upsert(category.clone())]).await? {
                log::info!("카테고리 생성: id={}, parent={:?}", id, category.parent_category_id);
                return Ok(forest.view_of(&category));
            }

            log::warn!("카테고리 버전 충돌 (생성): version={}, attempt={}/{}", version, attempt, MAX_COMMIT_ATTEMPTS);
        }

        Err(category_conflict())
    }

    /// 이름, 설명, 부모를 모두 덮어씁니다. 카테고리가 없으면 `false`.
    pub async fn update(&self, id: i64, request: CategoryRequest) -> AppResult<bool> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let (version, forest) = self.forest().await?;

            if !forest.contains(id) {
                return Ok(false);
            }
            forest.validate_reparent(id, request.parent_category_id)?;

            let category = Category {
                id,
                name: request.name.clone(),
                description: request.description.clone(),
                parent_category_id: request.parent_category_id,
            };

            if self.store.commit(version, vec![CategoryWrite::Upsert(category)]).await? {
                log::info!("카테고리 수정: id={}, parent={:?}", id, request.parent_category_id);
                return Ok(true);
            }

            log::warn!("카테고리 버전 충돌 (수정): id={}, attempt={}/{}", id, attempt, MAX_COMMIT_ATTEMPTS);
        }

        Err(category_conflict())
    }

    /// 하위 카테고리가 없을 때만 삭제합니다. 연결된 상품은 카테고리 없음으로 남습니다.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let (version, forest) = self.forest().await?;

            if !forest.contains(id) {
                return Ok(false);
            }
            if forest.has_children(id) {
                return Err(AppError::ConflictError(
                    "하위 카테고리가 있는 카테고리는 삭제할 수 없습니다. 하위 카테고리를 먼저 삭제하거나 이동하세요".to_string(),
                ));
            }

            if self.store.commit(version, vec![CategoryWrite::Remove(id)]).await? {
                log::info!("카테고리 삭제: id={}", id);
                return Ok(true);
            }

            log::warn!("카테고리 버전 충돌 (삭제): id={}, attempt={}/{}", id, attempt, MAX_COMMIT_ATTEMPTS);
        }

        Err(category_conflict())
    }
}
