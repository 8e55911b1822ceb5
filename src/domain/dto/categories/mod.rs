//! 카테고리 API DTO

pub mod category_request;
pub mod category_response;

pub use category_request::{CategoryRequest, CategoryListQuery};
pub use category_response::{CategoryResponse, CategoryHierarchyResponse};
