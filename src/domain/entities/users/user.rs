//! User 엔티티
//!
//! `users` 컬렉션에 저장되는 사용자 문서입니다.
//! 주소, 장바구니, 위시리스트는 각각 `user_id`로 사용자를 참조합니다.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use crate::config::Role;

/// 스토어프론트 사용자
///
/// # 필드 설명
///
/// * `email_lower` - 대소문자 구분 없는 이메일 중복 검사를 위한 정규화 값 (unique 인덱스)
/// * `address_version` - 주소록 변경 시마다 증가하는 낙관적 동시성 버전
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub email_lower: String,
    pub password_hash: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub address_version: i64,
}

impl User {
    /// 회원가입용 새 사용자를 생성합니다. 역할은 항상 `Customer`입니다.
    pub fn new_customer(id: i64, name: String, email: String, password_hash: String) -> Self {
        let email_lower = email.to_lowercase();

        Self {
            id,
            name,
            email,
            email_lower,
            password_hash,
            role: Role::Customer,
            phone: None,
            date_of_birth: None,
            gender: None,
            created_at: Utc::now(),
            address_version: 0,
        }
    }

    /// 이메일을 변경하면서 정규화 값도 함께 갱신합니다.
    pub fn set_email(&mut self, email: String) {
        self.email_lower = email.to_lowercase();
        self.email = email;
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
