//! 工程上下文
//!
//! 每个命令/查询处理器都显式接收当前打开的工程

use crate::domain::project::{Project, ProjectLayout};

/// 已打开的工程
#[derive(Debug, Clone)]
pub struct ProjectContext {
    layout: ProjectLayout,
    project: Project,
}

impl ProjectContext {
    pub fn new(layout: ProjectLayout, project: Project) -> Self {
        Self { layout, project }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// 替换为已成功持久化的工程
    pub fn commit(&mut self, project: Project) {
        self.project = project;
    }
}
