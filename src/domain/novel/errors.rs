//! Novel Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NovelError {
    #[error("小说不存在: {0}")]
    NotFound(String),

    #[error("无效的小说名称: {0}")]
    InvalidName(String),

    #[error("不支持的文件类型: {0}")]
    UnsupportedFile(String),
}
