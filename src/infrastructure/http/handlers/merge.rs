//! Merge HTTP Handlers

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use super::with_project;
use crate::application::{MergeProject, MergeReport};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// RFC 5987 编码的 Content-Disposition
fn attachment_disposition(file_name: &str) -> String {
    let mut encoded = String::with_capacity(file_name.len() * 3);
    for byte in file_name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    format!("attachment; filename*=UTF-8''{}", encoded)
}

/// 合并当前工程
pub async fn merge_project(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<MergeReport>>, ApiError> {
    let report = with_project(&state, |state, ctx| {
        state.merge_project_handler.handle(ctx, MergeProject)
    })
    .await?;

    Ok(Json(ApiResponse::success(report)))
}

/// 下载合并结果
pub async fn download_merged(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let (path, file_name) = with_project(&state, |_, ctx| {
        let layout = ctx.layout();
        Ok((layout.merged_output_path(), format!("{}.txt", layout.folder_name())))
    })
    .await?;

    if !path.exists() {
        return Err(ApiError::NotFound(format!(
            "Merged file not found: {}",
            path.display()
        )));
    }

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to open merged file: {}", e)))?;

    let file_size = file
        .metadata()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to get file metadata: {}", e)))?
        .len();

    // 流式返回文件内容
    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CONTENT_LENGTH, file_size)
        .header(header::CONTENT_DISPOSITION, attachment_disposition(&file_name))
        .body(body)
        .map_err(|e| ApiError::Internal(format!("Failed to build response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::handlers::test_util::{
        app, create_project, get_json, post_json, send,
    };
    use axum::http::Request;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_attachment_disposition() {
        assert_eq!(
            attachment_disposition("合集.txt"),
            "attachment; filename*=UTF-8''%E5%90%88%E9%9B%86.txt"
        );
        assert_eq!(attachment_disposition("a b.txt"), "attachment; filename*=UTF-8''a%20b.txt");
    }

    #[tokio::test]
    async fn test_merge_empty_project() {
        let dir = tempdir().unwrap();
        let app = app();
        create_project(&app, &dir.path().join("proj")).await;

        let json = post_json(&app, "/api/merge", json!({})).await;
        assert_eq!(json["errno"], 409);

        let json = get_json(&app, "/api/merge/download").await;
        assert_eq!(json["errno"], 404);
    }

    #[tokio::test]
    async fn test_merge_and_download() {
        let dir = tempdir().unwrap();
        let app = app();
        let root = dir.path().join("合集");
        create_project(&app, &root).await;

        for (name, content) in [("a.txt", "第1章 春\n甲\n"), ("b.txt", "第1章\n乙\n")] {
            let source = dir.path().join(name);
            std::fs::write(&source, content).unwrap();
            post_json(&app, "/api/novel/import", json!({ "path": source })).await;
        }

        let json = post_json(&app, "/api/merge", json!({})).await;
        assert_eq!(json["errno"], 0, "{}", json);
        assert_eq!(json["data"]["chapter_count"], 2);
        assert_eq!(json["data"]["novel_count"], 2);

        let request = Request::builder()
            .uri("/api/merge/download")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "第1章-a.txt-春\n甲\n\n\n第2章-b.txt-第1章\n乙\n\n\n"
        );
        assert!(root.join("合集.txt").is_file());
    }
}
