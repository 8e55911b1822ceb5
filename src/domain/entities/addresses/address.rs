use serde::{Deserialize, Serialize};

/// 사용자 배송지 주소
///
/// 한 사용자의 주소 중 `is_default`가 `true`인 것은 최대 하나이며,
/// 주소가 하나 이상이면 정확히 하나입니다. 이 불변식은 주소록 서비스가 유지합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,
    pub is_default: bool,
}
