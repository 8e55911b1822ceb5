//! 스토어프론트 서비스 백엔드
//!
//! 사용자 계정, 사용자별 주소록, 상품 카테고리 트리를 관리하는 REST API 서비스입니다.
//!
//! # Features
//!
//! - **사용자 관리**: 회원가입(장바구니/위시리스트 동시 생성), 프로필 관리, 계정 삭제
//! - **JWT 인증**: HS256 액세스 토큰, 역할(`Customer`/`Admin`) 기반 접근 제어
//! - **주소록**: 사용자당 기본 주소 정확히 하나 (주소가 있을 때)
//! - **카테고리 트리**: 순환 방지 재배치, 하위 카테고리가 있으면 삭제 거부, 계층 조회
//! - **저장소**: MongoDB(트랜잭션) 또는 메모리, 낙관적 버전으로 동시 변경 직렬화
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, 입력 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (AddressBook, CategoryForest)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore / AddressStore / CategoryStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB | Memory│ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront_service_backend::repositories::memory::MemoryStore;
//! use storefront_service_backend::services::addresses::AddressService;
//!
//! let store = Arc::new(MemoryStore::new());
//! let addresses = AddressService::new(store.clone());
//! let created = addresses.create(user_id, request).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
