//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::chapter::ChapterExtractor;
use crate::infrastructure::adapters::encoding::{
    EncodingPolicy, DEFAULT_CANDIDATE_ENCODINGS, DEFAULT_MAX_MALFORMED_RATIO,
};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `NOVELBINDER_SERVER__PORT=8080`
/// - `NOVELBINDER_PROJECT__DEFAULT_PATH=/data/短篇集`
/// - `NOVELBINDER_IMPORT__CANDIDATE_ENCODINGS=GB18030,Big5`
/// - `NOVELBINDER_CHAPTERS__ORDER=position`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5070)?
        .set_default("import.candidate_encodings", DEFAULT_CANDIDATE_ENCODINGS.to_vec())?
        .set_default("import.max_malformed_ratio", DEFAULT_MAX_MALFORMED_RATIO)?
        .set_default("import.max_upload_size", 50 * 1024 * 1024)?
        .set_default("chapters.order", "numeric")?
        .set_default("chapters.fallback_encoding", "GBK")?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: NOVELBINDER_，层级分隔符: __
    builder = builder.add_source(
        Environment::with_prefix("NOVELBINDER")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("import.candidate_encodings")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 根据配置构建编码策略
pub fn encoding_policy(config: &AppConfig) -> Result<EncodingPolicy, ConfigError> {
    EncodingPolicy::from_labels(
        &config.import.candidate_encodings,
        config.import.max_malformed_ratio,
        &config.chapters.fallback_encoding,
    )
    .map_err(ConfigError::ValidationError)
}

/// 根据配置构建章节提取器
pub fn chapter_extractor(config: &AppConfig) -> Result<ChapterExtractor, ConfigError> {
    ChapterExtractor::from_settings(
        config.chapters.heading_pattern.as_deref(),
        config.chapters.order,
    )
    .map_err(|e| ConfigError::ValidationError(e.to_string()))
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    let ratio = config.import.max_malformed_ratio;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(ConfigError::ValidationError(format!(
            "import.max_malformed_ratio must be within [0, 1], got {}",
            ratio
        )));
    }

    if config.import.max_upload_size == 0 {
        return Err(ConfigError::ValidationError(
            "import.max_upload_size cannot be 0".to_string(),
        ));
    }

    encoding_policy(config)?;
    chapter_extractor(config)?;

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    match &config.project.default_path {
        Some(path) => tracing::info!("Default Project: {}", path.display()),
        None => tracing::info!("Default Project: (none)"),
    }
    tracing::info!(
        "Candidate Encodings: {}",
        config.import.candidate_encodings.join(", ")
    );
    tracing::info!("Max Malformed Ratio: {}", config.import.max_malformed_ratio);
    tracing::info!("Max Upload Size: {} bytes", config.import.max_upload_size);
    tracing::info!(
        "Heading Pattern: {}",
        config.chapters.heading_pattern.as_deref().unwrap_or("(built-in)")
    );
    tracing::info!("Chapter Order: {}", config.chapters.order.as_str());
    tracing::info!("Fallback Encoding: {}", config.chapters.fallback_encoding);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
