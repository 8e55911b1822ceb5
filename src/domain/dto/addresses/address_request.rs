use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::utils::string_utils::{deserialize_optional_string, is_exact_digits};

/// 주소 생성/수정 요청
///
/// 생성과 수정 모두 전체 필드를 받습니다. 수정 시에는 모든 변경 가능한 필드를 덮어씁니다.
/// `isDefault`를 생략하면 `false`로 간주합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[validate(length(min = 3, message = "이름은 최소 3자 이상이어야 합니다"))]
    pub name: String,

    #[validate(length(min = 1, message = "주소를 입력해주세요"))]
    pub address_line1: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub address_line2: Option<String>,

    #[validate(length(min = 1, message = "도시를 입력해주세요"))]
    pub city: String,

    #[validate(length(min = 1, message = "주/도를 입력해주세요"))]
    pub state: String,

    #[validate(custom(function = "validate_postal_code"))]
    pub postal_code: String,

    #[validate(length(min = 1, message = "국가를 입력해주세요"))]
    pub country: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[serde(default)]
    pub is_default: bool,
}

fn validate_postal_code(postal_code: &str) -> Result<(), ValidationError> {
    if !is_exact_digits(postal_code, 6) {
        return Err(ValidationError::new("invalid_postal_code")
            .with_message("우편번호는 6자리 숫자여야 합니다".into()));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if !is_exact_digits(phone, 10) {
        return Err(ValidationError::new("invalid_phone")
            .with_message("전화번호는 10자리 숫자여야 합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_request(name: &str, is_default: bool) -> AddressRequest {
    AddressRequest {
        name: name.to_string(),
        address_line1: "12 MG Road".to_string(),
        address_line2: None,
        city: "Pune".to_string(),
        state: "MH".to_string(),
        postal_code: "411001".to_string(),
        country: "India".to_string(),
        phone: "9876543210".to_string(),
        is_default,
    }
}
