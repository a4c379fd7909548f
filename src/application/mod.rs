//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（NovelStorage、ProjectStore）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - context: 当前打开的工程
//! - error: 应用层错误定义

pub mod commands;
pub mod context;
pub mod error;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use commands::{
    // Novel commands
    DeleteNovel,
    ImportNovel,
    MarkChapterViewed,
    SetNovelOrder,
    // Project commands
    CreateProject,
    OpenProject,
    // Merge commands
    MergeProject,
    // Handlers
    handlers::{
        CreateProjectHandler, DeleteNovelHandler, DeleteNovelResponse, ImportNovelHandler,
        ImportNovelResponse, ImportOutcome, MarkChapterViewedHandler, MergeProjectHandler,
        MergeReport, OpenProjectHandler, SetNovelOrderHandler,
    },
};

pub use context::ProjectContext;
pub use error::ApplicationError;

pub use ports::{NovelStoragePort, ProjectStorePort, StorageError};

pub use queries::{
    // Novel queries
    GetChapterText,
    ListChapters,
    ListNovels,
    // Project queries
    GetProjectSummary,
    // Handlers
    handlers::{
        ChapterListResponse, ChapterSummary, ChapterTextResponse, GetChapterTextHandler,
        GetProjectSummaryHandler, ListChaptersHandler, ListNovelsHandler, NovelSummary,
        ProjectSummary,
    },
};
