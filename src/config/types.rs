//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::chapter::ChapterOrder;
use crate::infrastructure::adapters::encoding::{
    DEFAULT_CANDIDATE_ENCODINGS, DEFAULT_MAX_MALFORMED_RATIO,
};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 工程配置
    #[serde(default)]
    pub project: ProjectConfig,

    /// 导入配置
    #[serde(default)]
    pub import: ImportConfig,

    /// 章节配置
    #[serde(default)]
    pub chapters: ChaptersConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 工程配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    /// 启动时自动打开（不存在则创建）的工程目录
    #[serde(default)]
    pub default_path: Option<PathBuf>,
}

/// 导入配置
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// UTF-8 校验失败后依次尝试的编码
    #[serde(default = "default_candidate_encodings")]
    pub candidate_encodings: Vec<String>,

    /// 候选编码允许的畸形序列比例
    #[serde(default = "default_max_malformed_ratio")]
    pub max_malformed_ratio: f64,

    /// 上传文件最大大小（字节），默认 50MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
}

fn default_candidate_encodings() -> Vec<String> {
    DEFAULT_CANDIDATE_ENCODINGS
        .iter()
        .map(|label| label.to_string())
        .collect()
}

fn default_max_malformed_ratio() -> f64 {
    DEFAULT_MAX_MALFORMED_RATIO
}

fn default_max_upload_size() -> u64 {
    50 * 1024 * 1024 // 50 MB
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            candidate_encodings: default_candidate_encodings(),
            max_malformed_ratio: default_max_malformed_ratio(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 章节配置
#[derive(Debug, Clone, Deserialize)]
pub struct ChaptersConfig {
    /// 自定义章节标题正则，未设置时使用内置正则
    #[serde(default)]
    pub heading_pattern: Option<String>,

    /// 章节排序方式: numeric | position
    #[serde(default)]
    pub order: ChapterOrder,

    /// 读取小说时 UTF-8 失败后的回退编码
    #[serde(default = "default_fallback_encoding")]
    pub fallback_encoding: String,
}

fn default_fallback_encoding() -> String {
    "GBK".to_string()
}

impl Default for ChaptersConfig {
    fn default() -> Self {
        Self {
            heading_pattern: None,
            order: ChapterOrder::default(),
            fallback_encoding: default_fallback_encoding(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
