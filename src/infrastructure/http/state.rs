//! Application State
//!
//! 包含所有 Command/Query Handlers 以及当前工程会话

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateProjectHandler, DeleteNovelHandler, ImportNovelHandler, MarkChapterViewedHandler,
    MergeProjectHandler, OpenProjectHandler, SetNovelOrderHandler,
    // Query handlers
    GetChapterTextHandler, GetProjectSummaryHandler, ListChaptersHandler, ListNovelsHandler,
    // Ports
    NovelStoragePort, ProjectStorePort,
};
use crate::domain::chapter::ChapterExtractor;
use crate::infrastructure::memory::InMemoryProjectSession;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub session: Arc<InMemoryProjectSession>,
    pub store: Arc<dyn ProjectStorePort>,
    pub storage: Arc<dyn NovelStoragePort>,

    /// 上传文件大小上限（字节）
    pub max_upload_size: usize,

    // ========== Command Handlers ==========
    pub create_project_handler: CreateProjectHandler,
    pub open_project_handler: OpenProjectHandler,
    pub import_novel_handler: ImportNovelHandler,
    pub delete_novel_handler: DeleteNovelHandler,
    pub set_novel_order_handler: SetNovelOrderHandler,
    pub mark_chapter_viewed_handler: MarkChapterViewedHandler,
    pub merge_project_handler: MergeProjectHandler,

    // ========== Query Handlers ==========
    pub list_novels_handler: ListNovelsHandler,
    pub list_chapters_handler: ListChaptersHandler,
    pub get_chapter_text_handler: GetChapterTextHandler,
    pub get_project_summary_handler: GetProjectSummaryHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        session: Arc<InMemoryProjectSession>,
        store: Arc<dyn ProjectStorePort>,
        storage: Arc<dyn NovelStoragePort>,
        extractor: Arc<ChapterExtractor>,
        max_upload_size: usize,
    ) -> Self {
        Self {
            // Ports
            session,
            store: store.clone(),
            storage: storage.clone(),
            max_upload_size,

            // Command handlers
            create_project_handler: CreateProjectHandler::new(store.clone(), storage.clone()),
            open_project_handler: OpenProjectHandler::new(store.clone(), storage.clone()),
            import_novel_handler: ImportNovelHandler::new(store.clone(), storage.clone()),
            delete_novel_handler: DeleteNovelHandler::new(store.clone(), storage.clone()),
            set_novel_order_handler: SetNovelOrderHandler::new(store.clone()),
            mark_chapter_viewed_handler: MarkChapterViewedHandler::new(store.clone()),
            merge_project_handler: MergeProjectHandler::new(storage.clone(), extractor.clone()),

            // Query handlers
            list_novels_handler: ListNovelsHandler::new(),
            list_chapters_handler: ListChaptersHandler::new(storage.clone(), extractor.clone()),
            get_chapter_text_handler: GetChapterTextHandler::new(storage.clone(), extractor),
            get_project_summary_handler: GetProjectSummaryHandler::new(storage),
        }
    }
}
