use serde::{Deserialize, Serialize};

/// 상품 카테고리
///
/// 부모 방향 참조(`parent_category_id`)만 저장합니다.
/// 하위 카테고리와 소속 상품은 역참조로 조회합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_category_id: Option<i64>,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_category_id.is_none()
    }
}
