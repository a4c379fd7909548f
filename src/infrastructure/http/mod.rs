//! HTTP Layer - JSON API
//!
//! 三栏浏览界面（小说 → 章节 → 正文）及导入、合并等操作的请求入口

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
