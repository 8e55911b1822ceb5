//! 사용자 한 명의 주소록에 대한 순수 도메인 로직
//!
//! 저장소 스냅샷으로 만든 [`AddressBook`]에 변경을 적용하면, 변경된 주소만 추적했다가
//! [`AddressBook::into_writes`]로 커밋할 쓰기 목록을 돌려줍니다.
//!
//! 모든 변경 후 기본 주소 불변식을 복구합니다:
//! 주소가 하나 이상이면 기본 주소는 정확히 하나, 없으면 없음.

use std::collections::{BTreeMap, BTreeSet};
use crate::domain::dto::addresses::AddressRequest;
use crate::domain::entities::addresses::Address;
use crate::repositories::addresses::AddressWrite;

#[derive(Debug, Clone)]
pub struct AddressBook {
    user_id: i64,
    addresses: BTreeMap<i64, Address>,
    dirty: BTreeSet<i64>,
    removed: BTreeSet<i64>,
}

impl AddressBook {
    pub fn new(user_id: i64, addresses: Vec<Address>) -> Self {
        Self {
            user_id,
            addresses: addresses
                .into_iter()
                .filter(|a| a.user_id == user_id)
                .map(|a| (a.id, a))
                .collect(),
            dirty: BTreeSet::new(),
            removed: BTreeSet::new(),
        }
    }

    /// ID 오름차순
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.addresses.values()
    }

    pub fn get(&self, address_id: i64) -> Option<&Address> {
        self.addresses.get(&address_id)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn default_id(&self) -> Option<i64> {
        self.addresses.values().find(|a| a.is_default).map(|a| a.id)
    }

    /// 새 주소를 추가합니다.
    ///
    /// 요청이 기본 주소를 원하거나 첫 주소이면 기본 주소가 되고, 나머지는 해제됩니다.
    pub fn add(&mut self, address_id: i64, request: AddressRequest) -> Address {
        let becomes_default = request.is_default || self.addresses.is_empty();
        let mut created = address_from_request(address_id, self.user_id, request, false);

        self.addresses.insert(address_id, created.clone());
        self.dirty.insert(address_id);

        if becomes_default {
            self.make_sole_default(address_id);
        }
        self.repair_default();

        created.is_default = self.default_id() == Some(address_id);
        created
    }

    /// 변경 가능한 모든 필드를 덮어씁니다.
    ///
    /// * `isDefault = true` - 이미 기본이면 다른 주소는 그대로, 아니면 이 주소를 유일한 기본으로
    /// * `isDefault = false` - 현재 기본 주소였다면 가장 작은 ID의 다른 주소로 기본을 넘김
    ///   (주소가 하나뿐이면 계속 기본)
    pub fn revise(&mut self, address_id: i64, request: AddressRequest) -> Option<Address> {
        let was_default = self.addresses.get(&address_id)?.is_default;
        let wants_default = request.is_default;

        let revised = address_from_request(address_id, self.user_id, request, was_default);
        self.addresses.insert(address_id, revised);
        self.dirty.insert(address_id);

        if wants_default && !was_default {
            self.make_sole_default(address_id);
        } else if !wants_default && was_default {
            if let Some(successor) = self.lowest_id_except(address_id) {
                self.make_sole_default(successor);
            }
        }
        self.repair_default();

        self.addresses.get(&address_id).cloned()
    }

    /// 주소를 삭제합니다. 기본 주소였다면 남은 주소 중 가장 작은 ID가 기본이 됩니다.
    pub fn remove(&mut self, address_id: i64) -> bool {
        if self.addresses.remove(&address_id).is_none() {
            return false;
        }

        self.dirty.remove(&address_id);
        self.removed.insert(address_id);
        self.repair_default();

        true
    }

    /// 이 주소를 유일한 기본 주소로 지정합니다. 이미 기본이면 아무것도 바꾸지 않습니다.
    pub fn make_default(&mut self, address_id: i64) -> Option<Address> {
        if !self.addresses.contains_key(&address_id) {
            return None;
        }

        self.make_sole_default(address_id);
        self.repair_default();

        self.addresses.get(&address_id).cloned()
    }

    /// 커밋할 쓰기 목록 (삭제 먼저, 그다음 ID 오름차순 upsert)
    pub fn into_writes(self) -> Vec<AddressWrite> {
        let Self { addresses, dirty, removed, .. } = self;

        let mut writes: Vec<AddressWrite> = removed.into_iter().map(AddressWrite::Remove).collect();
        writes.extend(
            dirty
                .into_iter()
                .filter_map(|id| addresses.get(&id).cloned())
                .map(AddressWrite::Upsert),
        );
        writes
    }

    fn make_sole_default(&mut self, address_id: i64) {
        let ids: Vec<i64> = self.addresses.keys().copied().collect();
        for id in ids {
            self.set_flag(id, id == address_id);
        }
    }

    /// 기본 주소가 없거나 둘 이상인 상태를 정리합니다.
    ///
    /// 기본 주소 중 가장 작은 ID를 남기고, 하나도 없으면 가장 작은 ID의 주소를 기본으로 지정합니다.
    fn repair_default(&mut self) {
        let keep = self
            .default_id()
            .or_else(|| self.addresses.keys().next().copied());

        if let Some(keep) = keep {
            self.make_sole_default(keep);
        }
    }

    fn set_flag(&mut self, address_id: i64, is_default: bool) {
        if let Some(address) = self.addresses.get_mut(&address_id) {
            if address.is_default != is_default {
                address.is_default = is_default;
                self.dirty.insert(address_id);
            }
        }
    }

    fn lowest_id_except(&self, address_id: i64) -> Option<i64> {
        self.addresses.keys().copied().find(|id| *id != address_id)
    }
}

fn address_from_request(id: i64, user_id: i64, request: AddressRequest, is_default: bool) -> Address {
    Address {
        id,
        user_id,
        name: request.name,
        address_line1: request.address_line1,
        address_line2: request.address_line2,
        city: request.city,
        state: request.state,
        postal_code: request.postal_code,
        country: request.country,
        phone: request.phone,
        is_default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dto::addresses::address_request::sample_request;

    const USER: i64 = 1;

    fn defaults(book: &AddressBook) -> Vec<i64> {
        book.addresses().filter(|a| a.is_default).map(|a| a.id).collect()
    }

    fn book_with(ids_and_defaults: &[(i64, bool)]) -> AddressBook {
        let addresses = ids_and_defaults
            .iter()
            .map(|(id, is_default)| address_from_request(*id, USER, sample_request("Home", false), *is_default))
            .collect();
        AddressBook::new(USER, addresses)
    }

    #[test]
    fn test_first_address_is_always_default() {
        let mut book = AddressBook::new(USER, vec![]);
        let created = book.add(10, sample_request("Home", false));

        assert!(created.is_default);
        assert_eq!(defaults(&book), vec![10]);
    }

    #[test]
    fn test_new_default_clears_previous_default() {
        let mut book = book_with(&[(1, true), (2, false)]);
        let created = book.add(3, sample_request("Office", true));

        assert!(created.is_default);
        assert_eq!(defaults(&book), vec![3]);

        let writes = book.into_writes();
        let upserted: Vec<i64> = writes
            .iter()
            .filter_map(|w| match w {
                AddressWrite::Upsert(a) => Some(a.id),
                AddressWrite::Remove(_) => None,
            })
            .collect();
        assert_eq!(upserted, vec![1, 3]);
    }

    #[test]
    fn test_non_default_add_keeps_existing_default() {
        let mut book = book_with(&[(1, true)]);
        let created = book.add(2, sample_request("Office", false));

        assert!(!created.is_default);
        assert_eq!(defaults(&book), vec![1]);
        assert_eq!(book.into_writes(), vec![AddressWrite::Upsert(created)]);
    }

    #[test]
    fn test_revise_overwrites_fields() {
        let mut book = book_with(&[(1, true)]);
        let mut request = sample_request("Parents", true);
        request.city = "Mumbai".into();
        request.address_line2 = Some("Near the station".into());

        let revised = book.revise(1, request).unwrap();

        assert_eq!(revised.name, "Parents");
        assert_eq!(revised.city, "Mumbai");
        assert_eq!(revised.address_line2.as_deref(), Some("Near the station"));
        assert!(revised.is_default);
    }

    #[test]
    fn test_revise_to_default_moves_flag() {
        let mut book = book_with(&[(1, true), (2, false)]);
        let revised = book.revise(2, sample_request("Office", true)).unwrap();

        assert!(revised.is_default);
        assert_eq!(defaults(&book), vec![2]);
    }

    #[test]
    fn test_revise_default_already_default_touches_only_target() {
        let mut book = book_with(&[(1, true), (2, false)]);
        book.revise(1, sample_request("Home again", true)).unwrap();

        let writes = book.into_writes();
        assert_eq!(writes.len(), 1);
        assert!(matches!(&writes[0], AddressWrite::Upsert(a) if a.id == 1 && a.is_default));
    }

    #[test]
    fn test_revise_unsetting_default_hands_flag_to_lowest_other() {
        let mut book = book_with(&[(1, false), (2, true), (3, false)]);
        let revised = book.revise(2, sample_request("Office", false)).unwrap();

        assert!(!revised.is_default);
        assert_eq!(defaults(&book), vec![1]);
    }

    #[test]
    fn test_revise_unsetting_sole_address_keeps_it_default() {
        let mut book = book_with(&[(1, true)]);
        let revised = book.revise(1, sample_request("Home", false)).unwrap();

        assert!(revised.is_default);
        assert_eq!(defaults(&book), vec![1]);
    }

    #[test]
    fn test_revise_missing_address_is_none() {
        let mut book = book_with(&[(1, true)]);
        assert!(book.revise(99, sample_request("Home", true)).is_none());
        assert!(book.into_writes().is_empty());
    }

    #[test]
    fn test_removing_default_promotes_lowest_remaining() {
        let mut book = book_with(&[(1, false), (2, true), (3, false)]);

        assert!(book.remove(2));
        assert_eq!(defaults(&book), vec![1]);

        let writes = book.into_writes();
        assert_eq!(writes[0], AddressWrite::Remove(2));
        assert!(matches!(&writes[1], AddressWrite::Upsert(a) if a.id == 1 && a.is_default));
    }

    #[test]
    fn test_removing_last_address_leaves_empty_book() {
        let mut book = book_with(&[(1, true)]);

        assert!(book.remove(1));
        assert!(book.is_empty());
        assert_eq!(book.default_id(), None);
        assert_eq!(book.into_writes(), vec![AddressWrite::Remove(1)]);
    }

    #[test]
    fn test_remove_missing_address_returns_false() {
        let mut book = book_with(&[(1, true)]);
        assert!(!book.remove(5));
        assert!(book.into_writes().is_empty());
    }

    #[test]
    fn test_make_default_is_idempotent() {
        let mut book = book_with(&[(1, true), (2, false)]);

        let updated = book.make_default(2).unwrap();
        assert!(updated.is_default);
        assert_eq!(defaults(&book), vec![2]);

        let mut again = book_with(&[(1, false), (2, true)]);
        again.make_default(2).unwrap();
        assert!(again.into_writes().is_empty());
    }

    #[test]
    fn test_mutation_repairs_inconsistent_snapshot() {
        let mut book = book_with(&[(1, false), (2, true), (3, true)]);
        book.add(4, sample_request("Office", false));

        assert_eq!(defaults(&book), vec![2]);
    }

    #[test]
    fn test_foreign_addresses_are_ignored() {
        let mut foreign = address_from_request(7, 2, sample_request("Other", false), true);
        foreign.user_id = 2;
        let book = AddressBook::new(USER, vec![foreign]);

        assert!(book.is_empty());
    }

    #[test]
    fn test_invariant_holds_over_mixed_sequence() {
        let mut book = AddressBook::new(USER, vec![]);
        book.add(1, sample_request("Home", false));
        book.add(2, sample_request("Office", true));
        book.add(3, sample_request("Parents", false));
        book.revise(2, sample_request("Office", false));
        book.make_default(3);
        book.remove(3);
        book.add(4, sample_request("Gym", false));
        book.remove(1);

        assert_eq!(book.len(), 2);
        assert_eq!(defaults(&book).len(), 1);
    }
}
