//! HTTP Handlers
//!
//! 核心逻辑是同步的，统一放到阻塞线程中并持有工程会话锁执行

mod chapter;
mod merge;
mod novel;
mod ping;
mod project;

pub use chapter::*;
pub use merge::*;
pub use novel::*;
pub use ping::*;
pub use project::*;

use std::sync::Arc;

use crate::application::{ApplicationError, ProjectContext};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 在阻塞线程中执行（不要求已打开工程）
async fn run_blocking<R, F>(state: &Arc<AppState>, f: F) -> Result<R, ApiError>
where
    R: Send + 'static,
    F: FnOnce(&AppState) -> Result<R, ApplicationError> + Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| ApiError::Internal(format!("Blocking task failed: {}", e)))?
        .map_err(ApiError::from)
}

/// 在阻塞线程中对当前打开的工程执行操作
async fn with_project<R, F>(state: &Arc<AppState>, f: F) -> Result<R, ApiError>
where
    R: Send + 'static,
    F: FnOnce(&AppState, &mut ProjectContext) -> Result<R, ApplicationError> + Send + 'static,
{
    run_blocking(state, move |state| {
        state.session.with_context(|ctx| f(state, ctx))
    })
    .await
}
