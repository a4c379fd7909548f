//! Project Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateProject, OpenProject};
use crate::application::context::ProjectContext;
use crate::application::error::ApplicationError;
use crate::application::ports::{NovelStoragePort, ProjectStorePort};
use crate::domain::project::ProjectLayout;

// ============================================================================
// CreateProject
// ============================================================================

/// CreateProject Handler - 创建工程目录结构并写入索引
pub struct CreateProjectHandler {
    store: Arc<dyn ProjectStorePort>,
    storage: Arc<dyn NovelStoragePort>,
}

impl CreateProjectHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>, storage: Arc<dyn NovelStoragePort>) -> Self {
        Self { store, storage }
    }

    /// 已有工程目录会被直接打开（保留其中的索引）
    pub fn handle(&self, command: CreateProject) -> Result<ProjectContext, ApplicationError> {
        let layout = ProjectLayout::new(command.root);

        self.storage.ensure_dir(layout.root())?;
        self.storage.ensure_dir(&layout.novels_dir())?;
        self.storage.ensure_dir(&layout.cache_dir())?;

        let project = self.store.load(&layout)?;
        if !self.storage.exists(&layout.index_file()) {
            self.store.save(&layout, &project)?;
        }

        tracing::info!(
            root = %layout.root().display(),
            novels = project.novel_count(),
            "Project created"
        );

        Ok(ProjectContext::new(layout, project))
    }
}

// ============================================================================
// OpenProject
// ============================================================================

/// OpenProject Handler - 加载工程并修复失效的小说路径
pub struct OpenProjectHandler {
    store: Arc<dyn ProjectStorePort>,
    storage: Arc<dyn NovelStoragePort>,
}

impl OpenProjectHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>, storage: Arc<dyn NovelStoragePort>) -> Self {
        Self { store, storage }
    }

    pub fn handle(&self, command: OpenProject) -> Result<ProjectContext, ApplicationError> {
        let layout = ProjectLayout::new(command.root);

        if !self.storage.exists(layout.root()) {
            return Err(ApplicationError::not_found(
                "Project",
                layout.root().display().to_string(),
            ));
        }

        let mut project = self.store.load(&layout)?;

        let storage = &self.storage;
        let healed = project.heal_paths(&layout.novels_dir(), |path| storage.exists(path));
        if healed > 0 {
            self.store.save(&layout, &project)?;
            tracing::info!(
                root = %layout.root().display(),
                healed = healed,
                "Novel paths relocated into project"
            );
        }

        tracing::info!(
            root = %layout.root().display(),
            novels = project.novel_count(),
            "Project opened"
        );

        Ok(ProjectContext::new(layout, project))
    }
}
