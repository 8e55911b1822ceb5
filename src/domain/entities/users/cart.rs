use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자당 정확히 하나 존재하는 장바구니
///
/// 회원가입 트랜잭션에서 사용자와 함께 생성되고, 사용자 삭제 시 함께 삭제됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// 사용자당 정확히 하나 존재하는 위시리스트
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(rename = "_id")]
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Cart {
    pub fn for_user(id: i64, user_id: i64) -> Self {
        Self { id, user_id, created_at: Utc::now() }
    }
}

impl Wishlist {
    pub fn for_user(id: i64, user_id: i64) -> Self {
        Self { id, user_id, created_at: Utc::now() }
    }
}
