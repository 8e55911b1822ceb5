//! 카테고리 포리스트 계산
//!
//! 스냅샷 하나로 부모 검증, 순환 검사, 목록/계층 뷰를 모두 메모리에서 계산합니다.
//! 자식 목록은 항상 ID 오름차순입니다.

use std::collections::{BTreeMap, HashMap, HashSet};
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::categories::{CategoryHierarchyResponse, CategoryResponse};
use crate::domain::entities::categories::Category;
use crate::repositories::categories::CategorySnapshot;
use crate::utils::string_utils::contains_ignore_case;

#[derive(Debug, Clone, Default)]
pub struct CategoryForest {
    categories: BTreeMap<i64, Category>,
    children: HashMap<i64, Vec<i64>>,
    product_counts: HashMap<i64, u64>,
}

impl From<CategorySnapshot> for CategoryForest {
    fn from(snapshot: CategorySnapshot) -> Self {
        Self::new(snapshot.categories, snapshot.product_counts)
    }
}

impl CategoryForest {
    pub fn new(categories: Vec<Category>, product_counts: HashMap<i64, u64>) -> Self {
        let categories: BTreeMap<i64, Category> = categories.into_iter().map(|c| (c.id, c)).collect();

        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();
        // BTreeMap 순회이므로 자식 목록은 자동으로 ID 오름차순
        for category in categories.values() {
            if let Some(parent_id) = category.parent_category_id {
                children.entry(parent_id).or_default().push(category.id);
            }
        }

        Self { categories, children, product_counts }
    }

    pub fn get(&self, id: i64) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.categories.contains_key(&id)
    }

    pub fn children_of(&self, id: i64) -> &[i64] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_children(&self, id: i64) -> bool {
        !self.children_of(id).is_empty()
    }

    /// `candidate`가 `ancestor`의 하위 트리(자기 자신 제외)에 속하는지 확인합니다.
    pub fn is_descendant(&self, ancestor: i64, candidate: i64) -> bool {
        let mut visited = HashSet::new();
        let mut stack: Vec<i64> = self.children_of(ancestor).to_vec();

        while let Some(id) = stack.pop() {
            if id == candidate {
                return true;
            }
            if visited.insert(id) {
                stack.extend_from_slice(self.children_of(id));
            }
        }

        false
    }

    /// 새 카테고리의 부모를 검증합니다.
    pub fn validate_new_parent(&self, parent_id: Option<i64>) -> AppResult<()> {
        match parent_id {
            Some(parent_id) if !self.contains(parent_id) => Err(missing_parent()),
            _ => Ok(()),
        }
    }

    /// 기존 카테고리 `id`의 부모를 `parent_id`로 바꿀 수 있는지 검증합니다.
    ///
    /// 자기 자신, 존재하지 않는 카테고리, 자신의 하위 카테고리는 부모가 될 수 없습니다.
    pub fn validate_reparent(&self, id: i64, parent_id: Option<i64>) -> AppResult<()> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };

        if parent_id == id {
            return Err(AppError::InvalidArgument(
                "카테고리는 자기 자신을 상위 카테고리로 가질 수 없습니다".to_string(),
            ));
        }

        if !self.contains(parent_id) {
            return Err(missing_parent());
        }

        if self.is_descendant(id, parent_id) {
            return Err(AppError::InvalidArgument(
                "하위 카테고리를 상위 카테고리로 지정하면 순환 구조가 됩니다".to_string(),
            ));
        }

        Ok(())
    }

    /// 포리스트에 없는 카테고리(예: 방금 생성한 카테고리)에도 사용할 수 있습니다.
    pub fn view_of(&self, category: &Category) -> CategoryResponse {
        CategoryResponse {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            parent_category_id: category.parent_category_id,
            parent_category_name: self.parent_name(category),
            product_count: self.product_count(category.id),
            has_sub_categories: self.has_children(category.id),
        }
    }

    pub fn view(&self, id: i64) -> Option<CategoryResponse> {
        self.get(id).map(|c| self.view_of(c))
    }

    /// 이름 필터(대소문자 무시 부분 일치) 후 ID 오름차순으로 페이지를 자릅니다.
    pub fn list(&self, name_filter: Option<&str>, page: u64, page_size: u64) -> Vec<CategoryResponse> {
        let skip = page.saturating_sub(1).saturating_mul(page_size);

        self.categories
            .values()
            .filter(|c| name_filter.is_none_or(|filter| contains_ignore_case(&c.name, filter)))
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(page_size).unwrap_or(usize::MAX))
            .map(|c| self.view_of(c))
            .collect()
    }

    pub fn roots(&self) -> Vec<CategoryResponse> {
        self.categories
            .values()
            .filter(|c| c.is_root())
            .map(|c| self.view_of(c))
            .collect()
    }

    /// 직계 하위 카테고리. 부모가 없으면 빈 목록입니다.
    pub fn sub_categories(&self, parent_id: i64) -> Vec<CategoryResponse> {
        self.children_of(parent_id)
            .iter()
            .filter_map(|id| self.view(*id))
            .collect()
    }

    /// 루트부터 시작하는 전체 트리
    pub fn hierarchy(&self) -> Vec<CategoryHierarchyResponse> {
        let mut visited = HashSet::new();

        self.categories
            .values()
            .filter(|c| c.is_root())
            .map(|c| self.hierarchy_node(c, 0, &mut visited))
            .collect()
    }

    fn hierarchy_node(&self, category: &Category, level: u32, visited: &mut HashSet<i64>) -> CategoryHierarchyResponse {
        visited.insert(category.id);

        let mut sub_categories = Vec::new();
        for &child_id in self.children_of(category.id) {
            if visited.contains(&child_id) {
                continue;
            }
            if let Some(child) = self.get(child_id) {
                sub_categories.push(self.hierarchy_node(child, level + 1, visited));
            }
        }

        CategoryHierarchyResponse {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            parent_category_id: category.parent_category_id,
            parent_category_name: self.parent_name(category),
            product_count: self.product_count(category.id),
            has_sub_categories: !sub_categories.is_empty(),
            sub_categories,
            level,
        }
    }

    fn parent_name(&self, category: &Category) -> Option<String> {
        category
            .parent_category_id
            .and_then(|parent_id| self.get(parent_id))
            .map(|parent| parent.name.clone())
    }

    fn product_count(&self, id: i64) -> u64 {
        self.product_counts.get(&id).copied().unwrap_or(0)
    }
}

fn missing_parent() -> AppError {
    AppError::InvalidArgument("상위 카테고리가 존재하지 않습니다".to_string())
}
