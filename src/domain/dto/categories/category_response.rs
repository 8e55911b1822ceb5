use serde::{Deserialize, Serialize};

/// 카테고리 단건/목록 응답
///
/// `productCount`는 이 카테고리에 직접 연결된 상품 수입니다 (하위 카테고리 제외).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub parent_category_id: Option<i64>,
    pub parent_category_name: Option<String>,
    pub product_count: u64,
    pub has_sub_categories: bool,
}

/// 계층 구조 응답 노드
///
/// 루트의 `level`은 0이며 한 단계 내려갈 때마다 1씩 증가합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHierarchyResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub parent_category_id: Option<i64>,
    pub parent_category_name: Option<String>,
    pub product_count: u64,
    pub sub_categories: Vec<CategoryHierarchyResponse>,
    pub has_sub_categories: bool,
    pub level: u32,
}
