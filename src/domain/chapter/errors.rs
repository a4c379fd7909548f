//! Chapter Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChapterError {
    #[error("无效的章节标题正则: {0}")]
    InvalidPattern(String),

    #[error("章节不存在: {novel} #{index}")]
    NotFound { novel: String, index: usize },
}
