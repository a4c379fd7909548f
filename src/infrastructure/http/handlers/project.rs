//! Project HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use super::{run_blocking, with_project};
use crate::application::{CreateProject, GetProjectSummary, OpenProject, ProjectSummary};
use crate::infrastructure::http::dto::{ApiResponse, ProjectPathRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 新建工程并设为当前工程
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProjectPathRequest>,
) -> Result<Json<ApiResponse<ProjectSummary>>, ApiError> {
    let summary = run_blocking(&state, move |state| {
        let ctx = state
            .create_project_handler
            .handle(CreateProject { root: req.path })?;
        let summary = state
            .get_project_summary_handler
            .handle(&ctx, GetProjectSummary);
        state.session.open(ctx)?;
        Ok(summary)
    })
    .await?;

    Ok(Json(ApiResponse::success(summary)))
}

/// 打开已有工程并设为当前工程
pub async fn open_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProjectPathRequest>,
) -> Result<Json<ApiResponse<ProjectSummary>>, ApiError> {
    let summary = run_blocking(&state, move |state| {
        let ctx = state
            .open_project_handler
            .handle(OpenProject { root: req.path })?;
        let summary = state
            .get_project_summary_handler
            .handle(&ctx, GetProjectSummary);
        state.session.open(ctx)?;
        Ok(summary)
    })
    .await?;

    Ok(Json(ApiResponse::success(summary)))
}

/// 当前工程概要
pub async fn current_project(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ProjectSummary>>, ApiError> {
    let summary = with_project(&state, |state, ctx| {
        Ok(state
            .get_project_summary_handler
            .handle(ctx, GetProjectSummary))
    })
    .await?;

    Ok(Json(ApiResponse::success(summary)))
}
