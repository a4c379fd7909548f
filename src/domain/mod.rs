//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Novel Context: 小说记录
//! - Project Context: 工程（小说集合）
//! - Chapter Context: 章节提取与合并

pub mod chapter;
pub mod novel;
pub mod project;

pub use chapter::{ChapterExtractor, ChapterMarker, ChapterMerger, ChapterOrder, NovelText};
pub use novel::{Checksum, Novel, NovelName};
pub use project::{Project, ProjectLayout};
