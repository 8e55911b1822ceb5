use serde::Deserialize;
use validator::Validate;
use crate::config::PaginationConfig;

/// 카테고리 생성/수정 요청
///
/// `parentCategoryId`를 생략하거나 `null`로 보내면 루트 카테고리가 됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 100, message = "카테고리 이름은 1-100자 사이여야 합니다"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "설명은 500자를 넘을 수 없습니다"))]
    pub description: String,

    #[serde(default)]
    pub parent_category_id: Option<i64>,
}

/// 카테고리 목록 조회 쿼리 (`?name=&page=&pageSize=`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    pub name: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl CategoryListQuery {
    /// 1부터 시작하는 페이지 번호. 0이나 누락 값은 1로 취급합니다.
    pub fn page(&self) -> u64 {
        self.page.filter(|p| *p > 0).unwrap_or(1)
    }

    /// 페이지 크기. 누락 시 기본값, 최대값을 넘으면 최대값으로 제한합니다.
    pub fn page_size(&self) -> u64 {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or_else(PaginationConfig::default_page_size)
            .min(PaginationConfig::max_page_size())
    }

    /// 공백만 있는 이름 필터는 필터 없음으로 취급합니다.
    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}
