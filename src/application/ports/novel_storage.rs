//! Novel Storage Port - 出站端口
//!
//! 定义小说文件的复制、校验、读取与写出的抽象接口
//! 具体实现在 infrastructure/adapters/storage 层

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::chapter::NovelText;
use crate::domain::novel::Checksum;

/// 存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unable to detect encoding of {0}")]
    EncodingUndetected(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Novel Storage Port
pub trait NovelStoragePort: Send + Sync {
    /// 计算文件校验和，文件不存在时返回 None
    fn checksum(&self, path: &Path) -> Result<Option<Checksum>, StorageError>;

    /// 将文件复制到目标目录（文件名规范化）并转换为 UTF-8，返回新路径
    fn copy_into(&self, source: &Path, target_dir: &Path) -> Result<PathBuf, StorageError>;

    /// 读取小说文本（UTF-8 失败时回退到旧编码）
    fn read_text(&self, path: &Path) -> Result<NovelText, StorageError>;

    /// 写入字节到指定路径
    fn write_bytes(&self, path: &Path, data: &[u8]) -> Result<(), StorageError>;

    /// 先写临时文件再重命名到目标路径
    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), StorageError>;

    /// 删除文件
    fn remove(&self, path: &Path) -> Result<(), StorageError>;

    /// 确保目录存在
    fn ensure_dir(&self, dir: &Path) -> Result<(), StorageError>;

    /// 检查路径是否存在
    fn exists(&self, path: &Path) -> bool;
}
