//! Persistence Layer - 数据持久化
//!
//! 工程索引的 JSON 存储实现

pub mod json;

pub use self::json::JsonProjectStore;
