//! JSON 工程索引存储

mod project_store;

pub use project_store::JsonProjectStore;
