//! Project Context - 工程上下文
//!
//! 职责:
//! - 工程内小说列表与上次查看记录
//! - 工程目录布局
//! - 存储路径自修复

mod aggregate;
mod layout;

pub use aggregate::Project;
pub use layout::{ProjectLayout, CACHE_DIR_NAME, INDEX_FILE_NAME, NOVELS_DIR_NAME};
