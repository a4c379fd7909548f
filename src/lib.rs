//! NovelBinder - 小说工程整理与合并工具
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Chapter Context: 章节提取、排序与合并重编号
//! - Novel Context: 小说记录、文件名规范化、校验和
//! - Project Context: 工程聚合与目录布局
//!
//! 应用层 (application/):
//! - Ports: 端口定义（NovelStorage, ProjectStore）
//! - Commands: CQRS 命令处理器（导入、删除、排序、合并）
//! - Queries: CQRS 查询处理器（小说列表、章节列表、章节正文）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON API
//! - Memory: 当前工程会话
//! - Persistence: project.json 存储
//! - Adapters: 文件存储、编码探测与转换

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
