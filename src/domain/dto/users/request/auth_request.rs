use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::utils::string_utils::{deserialize_optional_string, is_exact_digits};

/// 회원가입 요청
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100, message = "이름은 2-100자 사이여야 합니다"))]
    pub name: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다"))]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(custom(function = "validate_optional_phone"))]
    pub phone: Option<String>,

    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub gender: Option<String>,
}

/// 로그인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 비밀번호 변경 요청
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "현재 비밀번호를 입력해주세요"))]
    pub current_password: String,

    #[validate(length(min = 6, message = "새 비밀번호는 최소 6자 이상이어야 합니다"))]
    pub new_password: String,
}

pub(crate) fn validate_optional_phone(phone: &str) -> Result<(), ValidationError> {
    if !is_exact_digits(phone, 10) {
        return Err(ValidationError::new("invalid_phone")
            .with_message("전화번호는 10자리 숫자여야 합니다".into()));
    }
    Ok(())
}
