pub mod category_forest;
pub mod category_service;

pub use category_forest::CategoryForest;
pub use category_service::CategoryService;
