//! Project Context - 工程目录布局

use std::path::{Path, PathBuf};

/// 工程索引文件名
pub const INDEX_FILE_NAME: &str = "project.json";
/// 导入小说存放目录
pub const NOVELS_DIR_NAME: &str = "novels";
/// 导入暂存目录
pub const CACHE_DIR_NAME: &str = "cache";

/// 工程目录布局
///
/// ```text
/// <root>/
///   project.json
///   novels/
///   cache/
///   <root 文件夹名>.txt   合并输出
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_file(&self) -> PathBuf {
        self.root.join(INDEX_FILE_NAME)
    }

    pub fn novels_dir(&self) -> PathBuf {
        self.root.join(NOVELS_DIR_NAME)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR_NAME)
    }

    /// 工程根目录的文件夹名
    pub fn folder_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string())
    }

    /// 合并输出路径 `<root>/<文件夹名>.txt`
    pub fn merged_output_path(&self) -> PathBuf {
        self.root.join(format!("{}.txt", self.folder_name()))
    }
}
