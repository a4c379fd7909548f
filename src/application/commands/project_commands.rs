//! Project Commands

use std::path::PathBuf;

/// 新建工程命令（目录不存在时创建）
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub root: PathBuf,
}

/// 打开已有工程命令
#[derive(Debug, Clone)]
pub struct OpenProject {
    pub root: PathBuf,
}
