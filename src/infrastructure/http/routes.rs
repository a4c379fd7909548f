//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查
//! - /api/project/create     POST  新建工程
//! - /api/project/open       POST  打开工程
//! - /api/project/current    GET   当前工程概要
//! - /api/novel/list         GET   列出小说
//! - /api/novel/import       POST  按路径导入小说
//! - /api/novel/upload       POST  上传小说（拖放导入）
//! - /api/novel/delete       POST  删除小说及其文件
//! - /api/novel/order        POST  设置合并顺序
//! - /api/chapter/list       POST  列出章节
//! - /api/chapter/content    POST  获取章节正文（记录上次查看）
//! - /api/merge              POST  合并工程
//! - /api/merge/download     GET   下载合并结果

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/project", project_routes())
        .nest("/novel", novel_routes())
        .nest("/chapter", chapter_routes())
        .route("/merge", post(handlers::merge_project))
        .route("/merge/download", get(handlers::download_merged))
}

/// Project 路由
fn project_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_project))
        .route("/open", post(handlers::open_project))
        .route("/current", get(handlers::current_project))
}

/// Novel 路由
fn novel_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_novels))
        .route("/import", post(handlers::import_novel))
        .route("/upload", post(handlers::upload_novel))
        .route("/delete", post(handlers::delete_novel))
        .route("/order", post(handlers::set_novel_order))
}

/// Chapter 路由
fn chapter_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", post(handlers::list_chapters))
        .route("/content", post(handlers::chapter_content))
}
