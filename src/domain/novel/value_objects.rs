//! Novel Context - Value Objects

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 规范化文件名：空白替换为 `-`，连续的 `-` 合并为一个
///
/// 保证 "a b.txt"、"a-b.txt"、"a--b.txt" 得到相同的比较键
pub fn normalize_file_name(file_name: &str) -> String {
    let mut normalized = String::with_capacity(file_name.len());
    for ch in file_name.chars() {
        let ch = if ch.is_whitespace() { '-' } else { ch };
        if ch == '-' && normalized.ends_with('-') {
            continue;
        }
        normalized.push(ch);
    }
    normalized
}

/// 取路径的文件名部分并规范化
pub fn normalized_file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(normalize_file_name)
}

/// 小说名称（规范化后的文件名，即小说的身份）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NovelName(String);

impl NovelName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("小说名称不能为空");
        }
        Ok(Self(name))
    }

    /// 从文件路径派生小说名称
    pub fn from_path(path: &Path) -> Result<Self, &'static str> {
        let name = normalized_file_name_of(path).ok_or("无法从路径获取文件名")?;
        Self::new(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NovelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 文件内容校验和（MD5 十六进制小写）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    pub fn from_digest(digest: md5::Digest) -> Self {
        Self(format!("{:x}", digest))
    }

    #[cfg(test)]
    pub(crate) fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 判断内容是否有更新：校验和不同即为更新（缺失文件视为不同）
pub fn has_changed(previous: Option<&Checksum>, current: Option<&Checksum>) -> bool {
    previous != current
}
