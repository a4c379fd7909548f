//! Merge Command Handlers

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::commands::MergeProject;
use crate::application::context::ProjectContext;
use crate::application::error::ApplicationError;
use crate::application::ports::NovelStoragePort;
use crate::domain::chapter::{ChapterExtractor, ChapterMerger};

/// 合并结果
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    pub output_path: PathBuf,
    pub novel_count: usize,
    pub chapter_count: usize,
    pub bytes: usize,
}

/// MergeProject Handler
///
/// 按 order 稳定排序遍历小说，全局重新编号章节，整体写入后原子替换输出文件
pub struct MergeProjectHandler {
    storage: Arc<dyn NovelStoragePort>,
    extractor: Arc<ChapterExtractor>,
}

impl MergeProjectHandler {
    pub fn new(storage: Arc<dyn NovelStoragePort>, extractor: Arc<ChapterExtractor>) -> Self {
        Self { storage, extractor }
    }

    pub fn handle(
        &self,
        ctx: &ProjectContext,
        _command: MergeProject,
    ) -> Result<MergeReport, ApplicationError> {
        let project = ctx.project();
        if project.is_empty() {
            return Err(ApplicationError::invalid_state("当前工程没有可合并的小说"));
        }

        let mut merger = ChapterMerger::new();
        for novel in project.merge_order() {
            let text = self.storage.read_text(novel.path())?;
            let markers = self.extractor.extract(&text);
            tracing::debug!(
                novel = %novel.name(),
                chapters = markers.len(),
                "Novel chapters collected"
            );
            merger.append_novel(novel.name().as_str(), &text, &markers);
        }

        let novel_count = merger.novel_count();
        let chapter_count = merger.chapter_count();
        let output = merger.finish();

        let output_path = ctx.layout().merged_output_path();
        self.storage.write_atomic(&output_path, &output)?;

        tracing::info!(
            output = %output_path.display(),
            novels = novel_count,
            chapters = chapter_count,
            bytes = output.len(),
            "Project merged"
        );

        Ok(MergeReport {
            output_path,
            novel_count,
            chapter_count,
            bytes: output.len(),
        })
    }
}
