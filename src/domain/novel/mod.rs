//! Novel Context - 小说限界上下文
//!
//! 职责:
//! - 小说记录（名称、路径、校验和、排序键）
//! - 文件名规范化与更新检测

mod entities;
mod errors;
mod value_objects;

pub use entities::Novel;
pub use errors::NovelError;
pub use value_objects::{
    has_changed, normalize_file_name, normalized_file_name_of, Checksum, NovelName,
};
