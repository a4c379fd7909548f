//! Chapter Context - 章节上下文
//!
//! 职责:
//! - 章节标题识别与排序
//! - 章节正文范围计算
//! - 多部小说合并与重新编号

mod entities;
mod errors;
mod extractor;
mod merger;

pub use entities::{chapter_line_range, strip_line_ending, ChapterMarker, ChapterOrder, NovelText};
pub use errors::ChapterError;
pub use extractor::{sort_key, ChapterExtractor, DEFAULT_HEADING_PATTERN};
pub use merger::{display_title, format_heading, ChapterMerger};
