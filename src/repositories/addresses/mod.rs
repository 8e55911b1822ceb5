//! 주소록 저장소
//!
//! 서비스는 사용자 한 명의 주소록을 버전과 함께 읽고([`AddressStore::load`]),
//! 도메인 로직으로 계산한 변경 목록을 같은 버전 조건으로 커밋합니다([`AddressStore::commit`]).
//! 커밋은 하나의 트랜잭션으로 적용되며, 버전이 바뀌었으면 아무것도 쓰지 않고 `false`를 반환합니다.

pub mod address_repo;

use async_trait::async_trait;
use crate::core::errors::AppResult;
use crate::domain::entities::addresses::Address;

/// 사용자 한 명의 주소록 스냅샷
#[derive(Debug, Clone)]
pub struct AddressSnapshot {
    /// 사용자 문서의 주소록 버전
    pub version: i64,
    /// ID 오름차순
    pub addresses: Vec<Address>,
}

/// 커밋할 주소 변경
#[derive(Debug, Clone, PartialEq)]
pub enum AddressWrite {
    /// 삽입 또는 전체 교체
    Upsert(Address),
    /// 삭제 (주소 ID)
    Remove(i64),
}

#[async_trait]
pub trait AddressStore: Send + Sync {
    /// 주소록을 읽습니다. 사용자가 없으면 `None`.
    async fn load(&self, user_id: i64) -> AppResult<Option<AddressSnapshot>>;

    /// 새 주소 ID를 발급합니다.
    async fn next_address_id(&self) -> AppResult<i64>;

    /// 버전이 `expected_version`과 같을 때만 변경을 적용하고 버전을 1 증가시킵니다.
    ///
    /// 버전이 다르거나 사용자가 삭제되었으면 `Ok(false)`를 반환합니다.
    async fn commit(&self, user_id: i64, expected_version: i64, writes: Vec<AddressWrite>) -> AppResult<bool>;
}
