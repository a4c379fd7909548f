//! Project Query Handlers

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::context::ProjectContext;
use crate::application::ports::NovelStoragePort;
use crate::application::queries::GetProjectSummary;

/// 工程概要
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub root: PathBuf,
    pub name: String,
    pub novel_count: usize,
    pub merged_output: PathBuf,
    pub merged_exists: bool,
}

/// GetProjectSummary Handler
pub struct GetProjectSummaryHandler {
    storage: Arc<dyn NovelStoragePort>,
}

impl GetProjectSummaryHandler {
    pub fn new(storage: Arc<dyn NovelStoragePort>) -> Self {
        Self { storage }
    }

    pub fn handle(&self, ctx: &ProjectContext, _query: GetProjectSummary) -> ProjectSummary {
        let layout = ctx.layout();
        let merged_output = layout.merged_output_path();
        ProjectSummary {
            root: layout.root().to_path_buf(),
            name: layout.folder_name(),
            novel_count: ctx.project().novel_count(),
            merged_exists: self.storage.exists(&merged_output),
            merged_output,
        }
    }
}
