//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Project DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProjectPathRequest {
    pub path: PathBuf,
}

// ============================================================================
// Novel DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ImportNovelRequest {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct DeleteNovelRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetNovelOrderRequest {
    pub name: String,
    pub order: i64,
}

// ============================================================================
// Chapter DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListChaptersRequest {
    pub novel: String,
}

#[derive(Debug, Deserialize)]
pub struct ChapterContentRequest {
    pub novel: String,
    pub index: usize,
}
