//! 测试辅助：基于临时目录的真实适配器

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::commands::handlers::CreateProjectHandler;
use crate::application::commands::CreateProject;
use crate::application::context::ProjectContext;
use crate::application::ports::{NovelStoragePort, ProjectStorePort, StorageError};
use crate::domain::project::{Project, ProjectLayout};
use crate::infrastructure::adapters::storage::FileNovelStorage;
use crate::infrastructure::persistence::json::JsonProjectStore;

pub(crate) fn adapters() -> (Arc<dyn ProjectStorePort>, Arc<dyn NovelStoragePort>) {
    (
        Arc::new(JsonProjectStore::new()),
        Arc::new(FileNovelStorage::default()),
    )
}

/// 在 root 下创建空工程
pub(crate) fn new_project(root: &Path) -> ProjectContext {
    let (store, storage) = adapters();
    CreateProjectHandler::new(store, storage)
        .handle(CreateProject {
            root: root.to_path_buf(),
        })
        .unwrap()
}

/// 写入一个 UTF-8 源文件
pub(crate) fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// 保存总是失败的工程存储
struct FailingStore;

impl ProjectStorePort for FailingStore {
    fn load(&self, _layout: &ProjectLayout) -> Result<Project, StorageError> {
        Ok(Project::new())
    }

    fn save(&self, _layout: &ProjectLayout, _project: &Project) -> Result<(), StorageError> {
        Err(StorageError::Io("disk full".to_string()))
    }
}

pub(crate) fn failing_store() -> Arc<dyn ProjectStorePort> {
    Arc::new(FailingStore)
}
