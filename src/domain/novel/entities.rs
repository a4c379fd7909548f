//! Novel Context - Entities

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{normalized_file_name_of, Checksum, NovelName};
use crate::domain::chapter::ChapterMarker;

fn is_zero(order: &i64) -> bool {
    *order == 0
}

/// 小说记录
///
/// 不变量:
/// - name 为规范化后的文件名，在工程内唯一
/// - path 指向工程 novels/ 目录下的 UTF-8 文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Novel {
    name: NovelName,
    path: PathBuf,
    #[serde(default)]
    md5: Option<Checksum>,
    /// 章节缓存（保留字段，章节总是从源文件重新提取）
    #[serde(default)]
    chapters: Vec<ChapterMarker>,
    /// 合并排序键，默认 0
    #[serde(default, skip_serializing_if = "is_zero")]
    order: i64,
}

impl Novel {
    pub fn new(name: NovelName, path: PathBuf, md5: Option<Checksum>) -> Self {
        Self {
            name,
            path,
            md5,
            chapters: Vec::new(),
            order: 0,
        }
    }

    pub fn name(&self) -> &NovelName {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn md5(&self) -> Option<&Checksum> {
        self.md5.as_ref()
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    /// 用于判断重复导入的比较键（规范化后的文件名）
    pub fn file_key(&self) -> Option<String> {
        normalized_file_name_of(&self.path)
    }

    /// 重新导入后更新内容
    pub fn update_content(&mut self, path: PathBuf, md5: Option<Checksum>) {
        self.path = path;
        self.md5 = md5;
    }

    pub fn relocate(&mut self, path: PathBuf) {
        self.path = path;
    }

    pub fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}
