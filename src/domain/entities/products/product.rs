use serde::{Deserialize, Serialize};

/// 상품 (카테고리 관리에 필요한 필드만)
///
/// 카테고리별 상품 수 집계와 카테고리 삭제 시 연결 해제에만 사용됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category_id: Option<i64>,
}
