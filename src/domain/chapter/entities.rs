//! Chapter Context - Entities

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 章节标记
///
/// 不变量:
/// - title 为标题行去除首尾空白后的文本
/// - start_line 为标题行在文件中的行号（从 0 开始）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterMarker {
    pub title: String,
    pub start_line: usize,
}

impl ChapterMarker {
    pub fn new(title: impl Into<String>, start_line: usize) -> Self {
        Self {
            title: title.into(),
            start_line,
        }
    }
}

/// 章节排序策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterOrder {
    /// 按标题中第一个阿拉伯数字排序（无数字视为 0）
    #[default]
    Numeric,
    /// 保持文件中的出现顺序
    Position,
}

impl ChapterOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChapterOrder::Numeric => "numeric",
            ChapterOrder::Position => "position",
        }
    }
}

/// 已解码的小说文本
///
/// 按行切分时保留行尾换行符，便于合并时原样输出正文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovelText {
    text: String,
}

impl NovelText {
    /// 创建文本（去除开头的 UTF-8 BOM）
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let text = match text.strip_prefix('\u{FEFF}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        };
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 按行切分（保留行尾换行符）
    pub fn lines(&self) -> Vec<&str> {
        self.text.split_inclusive('\n').collect()
    }
}

/// 去掉行尾的 `\n` / `\r\n`
pub fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(&['\n', '\r'][..])
}

/// 计算第 `index` 个章节覆盖的行范围 `[start_line, next_start_line)`
///
/// 最后一个章节延伸到文件末尾；排序后若下一章起始行在前，则返回空范围
pub fn chapter_line_range(
    markers: &[ChapterMarker],
    index: usize,
    total_lines: usize,
) -> Option<Range<usize>> {
    let marker = markers.get(index)?;
    let end = markers
        .get(index + 1)
        .map(|next| next.start_line)
        .unwrap_or(total_lines)
        .min(total_lines);
    let start = marker.start_line.min(end);
    Some(start..end)
}
