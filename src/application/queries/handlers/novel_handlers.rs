//! Novel Query Handlers

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::context::ProjectContext;
use crate::application::error::ApplicationError;
use crate::application::ports::NovelStoragePort;
use crate::application::queries::{GetChapterText, ListChapters, ListNovels};
use crate::domain::chapter::{chapter_line_range, ChapterError, ChapterExtractor, ChapterMarker, NovelText};
use crate::domain::novel::{Novel, NovelError};

// ============================================================================
// Response DTOs
// ============================================================================

/// 小说列表项
#[derive(Debug, Clone, Serialize)]
pub struct NovelSummary {
    pub name: String,
    pub path: PathBuf,
    pub md5: Option<String>,
    pub order: i64,
    pub last_viewed: Option<usize>,
}

/// 章节列表项
#[derive(Debug, Clone, Serialize)]
pub struct ChapterSummary {
    pub index: usize,
    pub title: String,
    pub start_line: usize,
}

/// 章节列表响应
#[derive(Debug, Clone, Serialize)]
pub struct ChapterListResponse {
    pub novel: String,
    pub chapters: Vec<ChapterSummary>,
    pub last_viewed: Option<usize>,
}

/// 章节正文响应
#[derive(Debug, Clone, Serialize)]
pub struct ChapterTextResponse {
    pub novel: String,
    pub index: usize,
    pub title: String,
    pub text: String,
}

fn find_novel<'a>(ctx: &'a ProjectContext, name: &str) -> Result<&'a Novel, ApplicationError> {
    ctx.project()
        .find(name)
        .ok_or_else(|| NovelError::NotFound(name.to_string()).into())
}

// ============================================================================
// Handlers
// ============================================================================

/// ListNovels Handler
#[derive(Debug, Default)]
pub struct ListNovelsHandler;

impl ListNovelsHandler {
    pub fn new() -> Self {
        Self
    }

    /// 按导入顺序列出
    pub fn handle(&self, ctx: &ProjectContext, _query: ListNovels) -> Vec<NovelSummary> {
        let project = ctx.project();
        project
            .novels()
            .iter()
            .map(|novel| NovelSummary {
                name: novel.name().to_string(),
                path: novel.path().to_path_buf(),
                md5: novel.md5().map(|m| m.to_string()),
                order: novel.order(),
                last_viewed: project.last_viewed_for(novel.name().as_str()),
            })
            .collect()
    }
}

/// ListChapters Handler - 每次都重新读取文件并提取章节
pub struct ListChaptersHandler {
    storage: Arc<dyn NovelStoragePort>,
    extractor: Arc<ChapterExtractor>,
}

impl ListChaptersHandler {
    pub fn new(storage: Arc<dyn NovelStoragePort>, extractor: Arc<ChapterExtractor>) -> Self {
        Self { storage, extractor }
    }

    pub fn handle(
        &self,
        ctx: &ProjectContext,
        query: ListChapters,
    ) -> Result<ChapterListResponse, ApplicationError> {
        let novel = find_novel(ctx, &query.novel)?;
        let text = self.storage.read_text(novel.path())?;
        let markers = self.extractor.extract(&text);

        tracing::debug!(novel = %novel.name(), chapters = markers.len(), "Chapters extracted");

        Ok(ChapterListResponse {
            novel: novel.name().to_string(),
            chapters: markers
                .into_iter()
                .enumerate()
                .map(|(index, marker)| ChapterSummary {
                    index,
                    title: marker.title,
                    start_line: marker.start_line,
                })
                .collect(),
            last_viewed: ctx.project().last_viewed_for(&query.novel),
        })
    }
}

/// GetChapterText Handler
pub struct GetChapterTextHandler {
    storage: Arc<dyn NovelStoragePort>,
    extractor: Arc<ChapterExtractor>,
}

impl GetChapterTextHandler {
    pub fn new(storage: Arc<dyn NovelStoragePort>, extractor: Arc<ChapterExtractor>) -> Self {
        Self { storage, extractor }
    }

    pub fn handle(
        &self,
        ctx: &ProjectContext,
        query: GetChapterText,
    ) -> Result<ChapterTextResponse, ApplicationError> {
        let novel = find_novel(ctx, &query.novel)?;
        let text = self.storage.read_text(novel.path())?;
        let markers = self.extractor.extract(&text);

        let (title, body) = chapter_text(&text, &markers, query.chapter_index).ok_or_else(|| {
            ChapterError::NotFound {
                novel: query.novel.clone(),
                index: query.chapter_index,
            }
        })?;

        Ok(ChapterTextResponse {
            novel: novel.name().to_string(),
            index: query.chapter_index,
            title,
            text: body,
        })
    }
}

/// 取章节标题与正文（标题行包含在正文中）
fn chapter_text(
    text: &NovelText,
    markers: &[ChapterMarker],
    index: usize,
) -> Option<(String, String)> {
    let lines = text.lines();
    let range = chapter_line_range(markers, index, lines.len())?;
    let title = markers[index].title.clone();
    Some((title, lines[range].concat()))
}
