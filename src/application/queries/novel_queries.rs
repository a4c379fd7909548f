//! Novel Queries

/// 列出工程内所有小说
#[derive(Debug, Clone, Default)]
pub struct ListNovels;

/// 列出一部小说的章节
#[derive(Debug, Clone)]
pub struct ListChapters {
    pub novel: String,
}

/// 获取章节正文（含标题行）
#[derive(Debug, Clone)]
pub struct GetChapterText {
    pub novel: String,
    pub chapter_index: usize,
}
