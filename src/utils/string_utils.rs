//! # 문자열 유틸리티
//!
//! DTO 역직렬화와 검증, 목록 필터링에서 공통으로 사용하는 문자열 함수들입니다.

use serde::Deserialize;

/// 선택적 문자열 정리
///
/// 앞뒤 공백을 제거하고, 결과가 빈 문자열이면 `None`을 반환합니다.
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  Flat 4 ".into())), Some("Flat 4".into()));
/// assert_eq!(clean_optional_string(Some("   ".into())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde `deserialize_with`용 선택적 문자열 역직렬화
///
/// 빈 문자열이나 공백만 있는 값은 `None`으로 처리합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct AddressRequest {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     address_line2: Option<String>,
/// }
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 정확히 `len`자리의 ASCII 숫자로만 이루어졌는지 검사합니다.
///
/// 우편번호(6자리)와 전화번호(10자리) 검증에 사용합니다.
pub fn is_exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// 대소문자를 구분하지 않는 부분 문자열 검색
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
