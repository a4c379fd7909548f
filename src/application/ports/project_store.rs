//! Project Store Port - 出站端口
//!
//! 工程索引（project.json）的持久化接口

use super::StorageError;
use crate::domain::project::{Project, ProjectLayout};

/// Project Store Port
pub trait ProjectStorePort: Send + Sync {
    /// 加载工程
    ///
    /// 索引文件不存在时返回空工程；内容损坏时返回 Serialization 错误
    fn load(&self, layout: &ProjectLayout) -> Result<Project, StorageError>;

    /// 保存工程（覆盖写入）
    fn save(&self, layout: &ProjectLayout, project: &Project) -> Result<(), StorageError>;
}
