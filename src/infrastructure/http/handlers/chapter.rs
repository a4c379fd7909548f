//! Chapter HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use super::with_project;
use crate::application::{
    ChapterListResponse, ChapterTextResponse, GetChapterText, ListChapters, MarkChapterViewed,
};
use crate::infrastructure::http::dto::{ApiResponse, ChapterContentRequest, ListChaptersRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出小说章节（每次重新扫描文件）
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListChaptersRequest>,
) -> Result<Json<ApiResponse<ChapterListResponse>>, ApiError> {
    let response = with_project(&state, move |state, ctx| {
        state
            .list_chapters_handler
            .handle(ctx, ListChapters { novel: req.novel })
    })
    .await?;

    Ok(Json(ApiResponse::success(response)))
}

/// 获取章节正文并记录为上次查看的章节
pub async fn chapter_content(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChapterContentRequest>,
) -> Result<Json<ApiResponse<ChapterTextResponse>>, ApiError> {
    let response = with_project(&state, move |state, ctx| {
        let text = state.get_chapter_text_handler.handle(
            ctx,
            GetChapterText {
                novel: req.novel.clone(),
                chapter_index: req.index,
            },
        )?;
        state.mark_chapter_viewed_handler.handle(
            ctx,
            MarkChapterViewed {
                novel: req.novel,
                chapter_index: req.index,
            },
        )?;
        Ok(text)
    })
    .await?;

    Ok(Json(ApiResponse::success(response)))
}
