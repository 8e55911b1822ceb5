//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 저장소 trait 객체(`Arc<dyn ...Store>`)를 주입받아 생성되며,
//! `main`에서 `web::Data`로 등록되어 핸들러에 전달됩니다.
//!
//! # Features
//!
//! - 사용자 생명주기 관리 (회원가입, 조회, 수정, 삭제)
//! - JWT 토큰 기반 인증
//! - 주소록 관리 (기본 주소 불변식 유지)
//! - 카테고리 트리 관리 (순환 방지, 계층 조회)
//!
//! # Examples
//!
//! ```rust,ignore
//! let store = Arc::new(MemoryStore::new());
//! let address_service = web::Data::new(AddressService::new(store.clone()));
//! let category_service = web::Data::new(CategoryService::new(store));
//! ```

pub mod users;
pub mod auth;
pub mod addresses;
pub mod categories;

/// 버전 충돌 시 "읽기 → 계산 → 커밋"을 다시 시도하는 최대 횟수
pub const MAX_COMMIT_ATTEMPTS: usize = 3;
