//! NovelBinder - 小说工程整理与合并工具
//!
//! - Domain: chapter/, novel/, project/
//! - Application: commands, queries, ports
//! - Infrastructure: http, memory, persistence, adapters

use std::sync::Arc;

use novelbinder::application::{CreateProject, CreateProjectHandler};
use novelbinder::config::{chapter_extractor, encoding_policy, load_config, print_config};
use novelbinder::infrastructure::adapters::FileNovelStorage;
use novelbinder::infrastructure::http::{AppState, HttpServer, ServerConfig};
use novelbinder::infrastructure::memory::InMemoryProjectSession;
use novelbinder::infrastructure::persistence::JsonProjectStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},novelbinder={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("NovelBinder - 小说工程整理与合并工具");
    print_config(&config);

    // 创建适配器
    let store = Arc::new(JsonProjectStore::new());
    let storage = Arc::new(FileNovelStorage::new(encoding_policy(&config)?));
    let extractor = Arc::new(chapter_extractor(&config)?);
    let session = Arc::new(InMemoryProjectSession::new());

    // 打开默认工程（不存在则创建）
    if let Some(root) = config.project.default_path.clone() {
        let handler = CreateProjectHandler::new(store.clone(), storage.clone());
        let ctx = handler.handle(CreateProject { root })?;
        session.open(ctx)?;
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        session,
        store,
        storage,
        extractor,
        config.import.max_upload_size as usize,
    );

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
