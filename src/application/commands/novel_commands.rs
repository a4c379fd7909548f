//! Novel Commands

use std::path::PathBuf;

/// 导入小说命令
#[derive(Debug, Clone)]
pub struct ImportNovel {
    pub source: PathBuf,
}

/// 删除小说命令（同时删除 novels/ 下的文件）
#[derive(Debug, Clone)]
pub struct DeleteNovel {
    pub name: String,
}

/// 设置小说合并顺序命令
#[derive(Debug, Clone)]
pub struct SetNovelOrder {
    pub name: String,
    pub order: i64,
}

/// 记录上次查看的章节
#[derive(Debug, Clone)]
pub struct MarkChapterViewed {
    pub novel: String,
    pub chapter_index: usize,
}
