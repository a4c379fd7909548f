//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod novel_storage;
mod project_store;

pub use novel_storage::{NovelStoragePort, StorageError};
pub use project_store::ProjectStorePort;
