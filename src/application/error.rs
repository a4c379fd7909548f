//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::StorageError;
use crate::domain::chapter::ChapterError;
use crate::domain::novel::NovelError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 状态无效（如未打开工程）
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建状态无效错误
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<StorageError> for ApplicationError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => Self::not_found("File", path),
            StorageError::Decode(_) | StorageError::EncodingUndetected(_) => {
                Self::ValidationError(err.to_string())
            }
            StorageError::Io(_) | StorageError::Serialization(_) => {
                Self::StorageError(err.to_string())
            }
        }
    }
}

impl From<NovelError> for ApplicationError {
    fn from(err: NovelError) -> Self {
        match err {
            NovelError::NotFound(name) => Self::not_found("Novel", name),
            NovelError::InvalidName(_) | NovelError::UnsupportedFile(_) => {
                Self::ValidationError(err.to_string())
            }
        }
    }
}

impl From<ChapterError> for ApplicationError {
    fn from(err: ChapterError) -> Self {
        match err {
            ChapterError::NotFound { novel, index } => {
                Self::not_found("Chapter", format!("{}#{}", novel, index))
            }
            ChapterError::InvalidPattern(_) => Self::ValidationError(err.to_string()),
        }
    }
}
