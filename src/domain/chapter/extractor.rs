//! 章节提取器
//!
//! 逐行匹配章节标题，生成 (标题, 起始行) 标记列表并排序

use regex::Regex;
use std::sync::OnceLock;

use super::{strip_line_ending, ChapterError, ChapterMarker, ChapterOrder, NovelText};

/// 默认章节标题正则
///
/// 两种形式:
/// 1. 可选前导空白（含全角空格）+ 第 + 数字或单个中文数字 + 章 + 可选标题
/// 2. 行首紧凑形式 `第<数字|中文数字>章`
pub const DEFAULT_HEADING_PATTERN: &str = r"^[\s\x{3000}]*第[\s\x{3000}]*(?:\d+|[一二三四五六七八九十])[\s\x{3000}]*章[\s\x{3000}]*(.*)$|^第(?:\d+|[一二三四五六七八九十]+)章";

fn default_heading_regex() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(DEFAULT_HEADING_PATTERN).expect("default heading pattern compiles"))
}

fn digit_run_regex() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"\d+").expect("digit pattern compiles"))
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    digit_run_regex().is_match(c.encode_utf8(&mut buf))
}

/// Unicode 十进制数字的数值
///
/// 每组十进制数字按 0..9 连续编码，向前找到所在连续段的起点即可算出数值
fn digit_value(c: char) -> Option<u64> {
    if let Some(d) = c.to_digit(10) {
        return Some(u64::from(d));
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        start -= 1;
    }
    Some(u64::from((c as u32 - start) % 10))
}

/// 排序键：标题中第一段十进制数字（含全角数字）的数值，无数字时为 0
///
/// 超出 u64 范围的数字按 u64::MAX 处理
pub fn sort_key(title: &str) -> u64 {
    let Some(run) = digit_run_regex().find(title) else {
        return 0;
    };

    run.as_str()
        .chars()
        .try_fold(0u64, |acc, c| {
            let digit = digit_value(c)?;
            acc.checked_mul(10)?.checked_add(digit)
        })
        .unwrap_or(u64::MAX)
}

/// 章节提取器
#[derive(Debug, Clone)]
pub struct ChapterExtractor {
    heading: Regex,
    order: ChapterOrder,
}

impl Default for ChapterExtractor {
    fn default() -> Self {
        Self {
            heading: default_heading_regex().clone(),
            order: ChapterOrder::default(),
        }
    }
}

impl ChapterExtractor {
    /// 使用自定义标题正则创建
    pub fn new(pattern: &str, order: ChapterOrder) -> Result<Self, ChapterError> {
        let heading =
            Regex::new(pattern).map_err(|e| ChapterError::InvalidPattern(e.to_string()))?;
        Ok(Self { heading, order })
    }

    /// 使用默认标题正则创建
    pub fn with_order(order: ChapterOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// 根据可选配置创建（None 表示默认正则）
    pub fn from_settings(pattern: Option<&str>, order: ChapterOrder) -> Result<Self, ChapterError> {
        match pattern {
            Some(pattern) => Self::new(pattern, order),
            None => Ok(Self::with_order(order)),
        }
    }

    pub fn order(&self) -> ChapterOrder {
        self.order
    }

    /// 判断一行是否为章节标题
    pub fn is_heading(&self, line: &str) -> bool {
        self.heading.is_match(strip_line_ending(line))
    }

    /// 提取章节标记
    ///
    /// 没有匹配到任何标题时返回空列表
    pub fn extract(&self, text: &NovelText) -> Vec<ChapterMarker> {
        let mut chapters: Vec<ChapterMarker> = text
            .lines()
            .into_iter()
            .enumerate()
            .filter(|(_, line)| self.is_heading(line))
            .map(|(index, line)| ChapterMarker::new(line.trim(), index))
            .collect();

        if self.order == ChapterOrder::Numeric {
            // 稳定排序，相同数字保持文件顺序
            chapters.sort_by_key(|chapter| sort_key(&chapter.title));
        }

        chapters
    }
}
