//! 章节合并
//!
//! 将多部小说的章节按顺序拼接，并以全局编号重写章节标题:
//! `第<序号>章-<小说名>-<标题>`

use regex::Regex;
use std::sync::OnceLock;

use super::{chapter_line_range, ChapterMarker, NovelText};

/// 章节之间的分隔（正文末尾换行后再空两行）
const CHAPTER_SEPARATOR: &str = "\n\n";

fn numbered_title_regex() -> &'static Regex {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    NUMBERED.get_or_init(|| Regex::new(r"^第(\d+)章\s*(.*)").expect("numbered title pattern compiles"))
}

/// 提取合并后使用的标题部分
///
/// - `第<数字>章 名称` → `名称`
/// - `第<数字>章` → `第<数字>章`
/// - 其他标题原样保留
pub fn display_title(raw_title: &str) -> String {
    let raw_title = raw_title.trim();
    match numbered_title_regex().captures(raw_title) {
        Some(caps) => {
            let name = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
            if name.is_empty() {
                format!("第{}章", &caps[1])
            } else {
                name.to_string()
            }
        }
        None => raw_title.to_string(),
    }
}

/// 生成合并后的章节标题
pub fn format_heading(counter: usize, novel_name: &str, raw_title: &str) -> String {
    format!("第{}章-{}-{}", counter, novel_name, display_title(raw_title))
}

/// 合并器
///
/// 不变量:
/// - 章节序号从 1 开始，跨小说全局递增，每章加 1
/// - 原标题行不进入正文
#[derive(Debug, Default)]
pub struct ChapterMerger {
    output: String,
    chapter_count: usize,
    novel_count: usize,
}

impl ChapterMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一部小说的全部章节
    pub fn append_novel(&mut self, novel_name: &str, text: &NovelText, markers: &[ChapterMarker]) {
        let lines = text.lines();

        for (index, marker) in markers.iter().enumerate() {
            let counter = self.chapter_count + 1;
            self.output
                .push_str(&format_heading(counter, novel_name, &marker.title));
            self.output.push('\n');

            if let Some(range) = chapter_line_range(markers, index, lines.len()) {
                let body_start = (range.start + 1).min(range.end);
                for line in &lines[body_start..range.end] {
                    self.output.push_str(line);
                }
                if body_start < range.end && !self.output.ends_with('\n') {
                    self.output.push('\n');
                }
            }

            self.output.push_str(CHAPTER_SEPARATOR);
            self.chapter_count = counter;
        }

        self.novel_count += 1;
    }

    pub fn chapter_count(&self) -> usize {
        self.chapter_count
    }

    pub fn novel_count(&self) -> usize {
        self.novel_count
    }

    /// 完成合并，返回输出文本
    pub fn finish(self) -> String {
        self.output
    }
}
