//! Novel HTTP Handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use super::with_project;
use crate::application::{
    ApplicationError, DeleteNovel, DeleteNovelResponse, ImportNovel, ImportNovelResponse,
    ListNovels, NovelSummary, SetNovelOrder,
};
use crate::infrastructure::http::dto::{
    ApiResponse, DeleteNovelRequest, Empty, ImportNovelRequest, SetNovelOrderRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 取上传文件名的最后一段（去掉客户端附带的目录）
fn upload_file_name(raw: &str) -> Option<String> {
    raw.rsplit(|c| c == '/' || c == '\\')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
}

/// 列出当前工程的小说
pub async fn list_novels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<NovelSummary>>>, ApiError> {
    let novels = with_project(&state, |state, ctx| {
        Ok(state.list_novels_handler.handle(ctx, ListNovels))
    })
    .await?;

    Ok(Json(ApiResponse::success(novels)))
}

/// 按本地路径导入小说
pub async fn import_novel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportNovelRequest>,
) -> Result<Json<ApiResponse<ImportNovelResponse>>, ApiError> {
    let response = with_project(&state, move |state, ctx| {
        state
            .import_novel_handler
            .handle(ctx, ImportNovel { source: req.path })
    })
    .await?;

    Ok(Json(ApiResponse::success(response)))
}

/// 上传小说 TXT 文件（拖放导入）
///
/// multipart 字段 `file`，文件写入临时目录后走与路径导入相同的流程
pub async fn upload_novel(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ImportNovelResponse>>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .and_then(upload_file_name)
            .ok_or_else(|| ApiError::BadRequest("Missing file name".to_string()))?;

        if !file_name.to_lowercase().ends_with(".txt") {
            return Err(ApiError::BadRequest(
                "Only TXT files are allowed".to_string(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

        if bytes.len() > state.max_upload_size {
            return Err(ApiError::BadRequest(format!(
                "File too large. Maximum size is {} bytes",
                state.max_upload_size
            )));
        }

        upload = Some((file_name, bytes.to_vec()));
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("Missing file field".to_string()))?;

    tracing::info!(file_name = %file_name, size = bytes.len(), "Novel uploaded");

    let response = with_project(&state, move |state, ctx| {
        let scratch = tempfile::tempdir()
            .map_err(|e| ApplicationError::internal(format!("Failed to create scratch dir: {}", e)))?;
        let source = scratch.path().join(&file_name);
        state.storage.write_bytes(&source, &bytes)?;
        state
            .import_novel_handler
            .handle(ctx, ImportNovel { source })
    })
    .await?;

    Ok(Json(ApiResponse::success(response)))
}

/// 删除小说（同时删除 novels/ 下的文件）
pub async fn delete_novel(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteNovelRequest>,
) -> Result<Json<ApiResponse<DeleteNovelResponse>>, ApiError> {
    let response = with_project(&state, move |state, ctx| {
        state
            .delete_novel_handler
            .handle(ctx, DeleteNovel { name: req.name })
    })
    .await?;

    Ok(Json(ApiResponse::success(response)))
}

/// 设置小说合并顺序
pub async fn set_novel_order(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetNovelOrderRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    with_project(&state, move |state, ctx| {
        state.set_novel_order_handler.handle(
            ctx,
            SetNovelOrder {
                name: req.name,
                order: req.order,
            },
        )
    })
    .await?;

    Ok(Json(ApiResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::handlers::test_util::{
        app, create_project, get_json, post_json, send,
    };
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::json;
    use tempfile::tempdir;

    fn multipart_request(file_name: &str, content: &[u8]) -> Request<Body> {
        let boundary = "novelbinder-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/novel/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_upload_file_name() {
        assert_eq!(upload_file_name("a.txt"), Some("a.txt".to_string()));
        assert_eq!(upload_file_name("C:\\dir\\b.txt"), Some("b.txt".to_string()));
        assert_eq!(upload_file_name("../c.txt"), Some("c.txt".to_string()));
        assert_eq!(upload_file_name("dir/"), None);
        assert_eq!(upload_file_name(".."), None);
    }

    #[tokio::test]
    async fn test_list_requires_project() {
        let json = get_json(&app(), "/api/novel/list").await;
        assert_eq!(json["errno"], 409);
    }

    #[tokio::test]
    async fn test_import_list_order_delete() {
        let dir = tempdir().unwrap();
        let app = app();
        create_project(&app, &dir.path().join("proj")).await;

        let source = dir.path().join("a b.txt");
        std::fs::write(&source, "第1章 开始\n正文\n").unwrap();

        let json = post_json(&app, "/api/novel/import", json!({ "path": source })).await;
        assert_eq!(json["errno"], 0, "{}", json);
        assert_eq!(json["data"]["name"], "a-b.txt");
        assert_eq!(json["data"]["outcome"], "added");

        let json = post_json(&app, "/api/novel/import", json!({ "path": source })).await;
        assert_eq!(json["data"]["outcome"], "unchanged");

        let json = post_json(&app, "/api/novel/order", json!({ "name": "a-b.txt", "order": 5 })).await;
        assert_eq!(json["errno"], 0);

        let json = get_json(&app, "/api/novel/list").await;
        let novels = json["data"].as_array().unwrap();
        assert_eq!(novels.len(), 1);
        assert_eq!(novels[0]["order"], 5);

        let json = post_json(&app, "/api/novel/delete", json!({ "name": "a-b.txt" })).await;
        assert_eq!(json["data"]["file_deleted"], true);

        let json = get_json(&app, "/api/novel/list").await;
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    async fn test_delete_unknown_novel() {
        let dir = tempdir().unwrap();
        let app = app();
        create_project(&app, &dir.path().join("proj")).await;

        let json = post_json(&app, "/api/novel/delete", json!({ "name": "none.txt" })).await;
        assert_eq!(json["errno"], 404);
    }

    #[tokio::test]
    async fn test_upload_novel() {
        let dir = tempdir().unwrap();
        let app = app();
        let root = dir.path().join("proj");
        create_project(&app, &root).await;

        let (gbk, _, _) = encoding_rs::GBK.encode("第1章 雨\n下雨了\n");
        let (_, body) = send(&app, multipart_request("rain  day.txt", &gbk)).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["errno"], 0, "{}", json);
        assert_eq!(json["data"]["name"], "rain-day.txt");
        let stored = std::fs::read_to_string(root.join("novels").join("rain-day.txt")).unwrap();
        assert_eq!(stored, "第1章 雨\n下雨了\n");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_txt() {
        let dir = tempdir().unwrap();
        let app = app();
        create_project(&app, &dir.path().join("proj")).await;

        let (_, body) = send(&app, multipart_request("cover.png", b"\x89PNG")).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["errno"], 400);
    }
}
