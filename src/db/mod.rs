//! Database Connection Management Module
//!
//! MongoDB 연결과 저장소 공통 기능(정수 ID 시퀀스, 트랜잭션 마무리, 중복 키 판별)을 제공합니다.
//!
//! # 환경 변수 설정
//!
//! ```bash
//! export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
//! export DATABASE_NAME="storefront_dev"
//! ```
//!
//! 주소록과 카테고리 변경은 다중 문서 트랜잭션으로 커밋되므로
//! MongoDB는 레플리카 셋(단일 노드 포함)으로 실행되어야 합니다.
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::db::Database;
//! use crate::repositories::addresses::address_repo::AddressRepository;
//!
//! let database = Arc::new(Database::new().await?);
//! let addresses = AddressRepository::new(database.clone());
//! addresses.create_indexes().await?;
//! ```

use mongodb::{
    bson::{doc, Bson, Document},
    error::{ErrorKind, WriteFailure, TRANSIENT_TRANSACTION_ERROR, UNKNOWN_TRANSACTION_COMMIT_RESULT},
    options::{ClientOptions, ReturnDocument},
    Client, ClientSession, Collection,
};
use log::{info, warn};
use crate::config::DatabaseConfig;
use crate::core::errors::{AppError, AppResult};

/// 컬렉션 이름
pub mod collections {
    pub const USERS: &str = "users";
    pub const ADDRESSES: &str = "addresses";
    pub const CATEGORIES: &str = "categories";
    pub const PRODUCTS: &str = "products";
    pub const CARTS: &str = "carts";
    pub const WISHLISTS: &str = "wishlists";
    pub const COUNTERS: &str = "counters";
    pub const META: &str = "meta";
}

/// MongoDB 데이터베이스 연결 래퍼
///
/// `Client`는 내부적으로 연결 풀을 공유하므로 `Arc<Database>`로 리포지토리 간에 공유합니다.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 새 MongoDB 데이터베이스 연결을 생성하고 `ping`으로 연결을 확인합니다.
    ///
    /// ## 환경 변수
    /// - `MONGODB_URI`: MongoDB 연결 URI (기본값: "mongodb://localhost:27017")
    /// - `DATABASE_NAME`: 데이터베이스 이름 (기본값: "storefront_dev")
    pub async fn new() -> AppResult<Self> {
        let mongodb_uri = DatabaseConfig::mongodb_uri();
        let database_name = DatabaseConfig::database_name();

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("storefront_service".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.get_database().collection::<T>(name)
    }

    /// `counters` 컬렉션에서 다음 정수 ID를 발급합니다.
    ///
    /// 트랜잭션 밖에서 증가시키므로 롤백된 작업의 ID는 재사용되지 않습니다 (번호 공백 허용).
    pub async fn next_sequence(&self, name: &str) -> AppResult<i64> {
        let counter = self.collection::<Document>(collections::COUNTERS)
            .find_one_and_update(
                doc! { "_id": name },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::DatabaseError(format!("{} 시퀀스를 발급하지 못했습니다", name)))?;

        bson_to_i64(counter.get("seq"))
            .ok_or_else(|| AppError::DatabaseError(format!("{} 시퀀스 값이 올바르지 않습니다", name)))
    }

    /// 트랜잭션이 시작된 새 세션을 엽니다.
    pub async fn begin(&self) -> AppResult<ClientSession> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;
        Ok(session)
    }
}

/// 버전 검사 트랜잭션을 마무리합니다.
///
/// * `Ok(true)` - 커밋 성공
/// * `Ok(false)` - 버전 불일치 또는 일시적 트랜잭션 충돌 (호출자가 재시도)
/// * `Err` - 그 외 저장소 오류
pub async fn finish_versioned(
    session: &mut ClientSession,
    outcome: Result<bool, mongodb::error::Error>,
) -> AppResult<bool> {
    match outcome {
        Ok(true) => match session.commit_transaction().await {
            Ok(()) => Ok(true),
            Err(e) if is_retryable_transaction_error(&e) => {
                warn!("트랜잭션 커밋 충돌, 재시도 대상: {}", e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        },
        Ok(false) => {
            session.abort_transaction().await?;
            Ok(false)
        }
        Err(e) => {
            if let Err(abort_err) = session.abort_transaction().await {
                warn!("트랜잭션 중단 실패: {}", abort_err);
            }
            if is_retryable_transaction_error(&e) {
                warn!("트랜잭션 쓰기 충돌, 재시도 대상: {}", e);
                Ok(false)
            } else {
                Err(e.into())
            }
        }
    }
}

/// 동시 트랜잭션 간 쓰기 충돌처럼 재시도로 해결 가능한 오류인지 판별합니다.
pub fn is_retryable_transaction_error(err: &mongodb::error::Error) -> bool {
    err.contains_label(TRANSIENT_TRANSACTION_ERROR) || err.contains_label(UNKNOWN_TRANSACTION_COMMIT_RESULT)
}

/// unique 인덱스 위반(E11000)인지 판별합니다.
pub fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == 11000,
        ErrorKind::Command(e) => e.code == 11000,
        _ => false,
    }
}

/// 버전 필드 비교 조건
///
/// 버전 필드가 아직 없는 문서는 버전 0으로 취급합니다.
pub fn version_condition(expected: i64) -> Bson {
    if expected == 0 {
        Bson::Document(doc! { "$in": [0_i64, Bson::Null] })
    } else {
        Bson::Int64(expected)
    }
}

/// 집계 결과 등에서 정수 필드를 읽습니다. (`$sum`은 Int32를 반환할 수 있음)
pub fn bson_to_i64(value: Option<&Bson>) -> Option<i64> {
    match value? {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) if v.fract() == 0.0 => Some(*v as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bson_to_i64_accepts_integer_types() {
        assert_eq!(bson_to_i64(Some(&Bson::Int32(3))), Some(3));
        assert_eq!(bson_to_i64(Some(&Bson::Int64(7))), Some(7));
        assert_eq!(bson_to_i64(Some(&Bson::Double(2.0))), Some(2));
        assert_eq!(bson_to_i64(Some(&Bson::Double(2.5))), None);
        assert_eq!(bson_to_i64(Some(&Bson::String("1".into()))), None);
        assert_eq!(bson_to_i64(None), None);
    }

    #[test]
    fn test_version_condition_treats_missing_as_zero() {
        assert_eq!(version_condition(3), Bson::Int64(3));
        assert!(matches!(version_condition(0), Bson::Document(d) if d.contains_key("$in")));
    }
}
