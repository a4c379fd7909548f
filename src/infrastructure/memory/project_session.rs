//! In-Memory Project Session
//!
//! 同一时间只有一个打开的工程，所有操作在锁内串行执行

use std::sync::{Mutex, MutexGuard};

use crate::application::context::ProjectContext;
use crate::application::error::ApplicationError;

/// 内存工程会话
#[derive(Debug, Default)]
pub struct InMemoryProjectSession {
    current: Mutex<Option<ProjectContext>>,
}

impl InMemoryProjectSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<ProjectContext>>, ApplicationError> {
        self.current
            .lock()
            .map_err(|_| ApplicationError::internal("project session lock poisoned"))
    }

    /// 设置当前工程，返回之前打开的工程
    pub fn open(&self, ctx: ProjectContext) -> Result<Option<ProjectContext>, ApplicationError> {
        let mut guard = self.lock()?;
        tracing::info!(root = %ctx.layout().root().display(), "Project session opened");
        Ok(guard.replace(ctx))
    }

    /// 在锁内对当前工程执行操作
    pub fn with_context<R>(
        &self,
        f: impl FnOnce(&mut ProjectContext) -> Result<R, ApplicationError>,
    ) -> Result<R, ApplicationError> {
        let mut guard = self.lock()?;
        let ctx = guard
            .as_mut()
            .ok_or_else(|| ApplicationError::invalid_state("No project is open"))?;
        f(ctx)
    }
}
