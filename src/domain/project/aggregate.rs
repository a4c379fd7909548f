//! Project Context - Aggregate Root

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::novel::{Novel, NovelError};

/// 取存储路径中的文件名（同时识别 `/` 与 `\` 分隔符）
fn stored_file_name(path: &Path) -> Option<&str> {
    path.to_str()?
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .filter(|name| !name.is_empty())
}

/// Project 聚合根
///
/// 不变量:
/// - novels 中名称唯一，保持导入顺序
/// - last_viewed 只记录仍在工程中的小说
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    novels: Vec<Novel>,
    #[serde(default)]
    last_viewed: BTreeMap<String, usize>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn novels(&self) -> &[Novel] {
        &self.novels
    }

    pub fn novel_count(&self) -> usize {
        self.novels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.novels.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Novel> {
        self.novels.iter().find(|n| n.name().as_str() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Novel> {
        self.novels.iter_mut().find(|n| n.name().as_str() == name)
    }

    /// 按规范化文件名查找（用于重复导入检测）
    pub fn find_by_file_key_mut(&mut self, key: &str) -> Option<&mut Novel> {
        self.novels
            .iter_mut()
            .find(|n| n.file_key().as_deref() == Some(key))
    }

    /// 添加小说
    ///
    /// 已存在同名或同路径的记录时不添加，返回 false
    pub fn add(&mut self, novel: Novel) -> bool {
        let duplicate = self
            .novels
            .iter()
            .any(|n| n.name() == novel.name() || n.path() == novel.path());
        if duplicate {
            return false;
        }
        self.novels.push(novel);
        true
    }

    /// 按名称移除小说，同时清除其查看记录
    pub fn remove(&mut self, name: &str) -> Result<Novel, NovelError> {
        let position = self
            .novels
            .iter()
            .position(|n| n.name().as_str() == name)
            .ok_or_else(|| NovelError::NotFound(name.to_string()))?;
        let removed = self.novels.remove(position);
        self.novels.retain(|n| n.name().as_str() != name);
        self.last_viewed.remove(name);
        Ok(removed)
    }

    pub fn set_order(&mut self, name: &str, order: i64) -> Result<(), NovelError> {
        let novel = self
            .find_mut(name)
            .ok_or_else(|| NovelError::NotFound(name.to_string()))?;
        novel.set_order(order);
        Ok(())
    }

    /// 合并顺序：按 order 稳定排序
    pub fn merge_order(&self) -> Vec<&Novel> {
        let mut novels: Vec<&Novel> = self.novels.iter().collect();
        novels.sort_by_key(|n| n.order());
        novels
    }

    pub fn last_viewed(&self) -> &BTreeMap<String, usize> {
        &self.last_viewed
    }

    pub fn last_viewed_for(&self, name: &str) -> Option<usize> {
        self.last_viewed.get(name).copied()
    }

    pub fn record_last_viewed(&mut self, name: &str, chapter_index: usize) -> Result<(), NovelError> {
        if self.find(name).is_none() {
            return Err(NovelError::NotFound(name.to_string()));
        }
        self.last_viewed.insert(name.to_string(), chapter_index);
        Ok(())
    }

    /// 路径自修复
    ///
    /// 记录路径与 `<novels_dir>/<文件名>` 不一致且该文件存在时，改写为新路径。
    /// 返回被改写的记录数
    pub fn heal_paths(&mut self, novels_dir: &Path, exists: impl Fn(&Path) -> bool) -> usize {
        let mut healed = 0;
        for novel in &mut self.novels {
            let Some(file_name) = stored_file_name(novel.path()) else {
                continue;
            };
            let expected = novels_dir.join(file_name);
            if novel.path() != expected.as_path() && exists(&expected) {
                tracing::debug!(
                    novel = %novel.name(),
                    from = %novel.path().display(),
                    to = %expected.display(),
                    "Novel path relocated"
                );
                novel.relocate(expected);
                healed += 1;
            }
        }
        healed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::NovelName;
    use std::path::PathBuf;

    fn novel(path: &str) -> Novel {
        let path = PathBuf::from(path);
        Novel::new(NovelName::from_path(&path).unwrap(), path, None)
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut project = Project::new();
        assert!(project.add(novel("/p/novels/a.txt")));
        assert!(!project.add(novel("/p/novels/a.txt")));
        assert!(project.add(novel("/p/novels/b.txt")));
        assert_eq!(project.novel_count(), 2);
    }

    #[test]
    fn test_remove_clears_last_viewed() {
        let mut project = Project::new();
        project.add(novel("/p/novels/a.txt"));
        project.record_last_viewed("a.txt", 4).unwrap();
        let removed = project.remove("a.txt").unwrap();
        assert_eq!(removed.name().as_str(), "a.txt");
        assert!(project.is_empty());
        assert!(project.last_viewed_for("a.txt").is_none());
    }

    #[test]
    fn test_remove_missing_leaves_project_unchanged() {
        let mut project = Project::new();
        project.add(novel("/p/novels/a.txt"));
        let before = project.clone();
        assert!(matches!(project.remove("nope.txt"), Err(NovelError::NotFound(_))));
        assert_eq!(project, before);
    }

    #[test]
    fn test_merge_order_is_stable() {
        let mut project = Project::new();
        project.add(novel("/p/novels/a.txt"));
        project.add(novel("/p/novels/b.txt"));
        project.add(novel("/p/novels/c.txt"));
        project.set_order("a.txt", 1).unwrap();
        let names: Vec<&str> = project.merge_order().iter().map(|n| n.name().as_str()).collect();
        assert_eq!(names, vec!["b.txt", "c.txt", "a.txt"]);
    }

    #[test]
    fn test_heal_paths() {
        let mut project = Project::new();
        project.add(novel("/old/place/novels/a.txt"));
        project.add(novel("/new/novels/b.txt"));
        project.add(novel("/old/place/novels/gone.txt"));

        let novels_dir = PathBuf::from("/new/novels");
        let healed = project.heal_paths(&novels_dir, |p| {
            p == Path::new("/new/novels/a.txt") || p == Path::new("/new/novels/b.txt")
        });

        assert_eq!(healed, 1);
        assert_eq!(project.find("a.txt").unwrap().path(), Path::new("/new/novels/a.txt"));
        assert_eq!(
            project.find("gone.txt").unwrap().path(),
            Path::new("/old/place/novels/gone.txt")
        );
    }

    #[test]
    fn test_heal_windows_style_path() {
        let mut project = Project::new();
        let path = PathBuf::from(r"C:\Users\x\proj\novels\a.txt");
        project.add(Novel::new(NovelName::new("a.txt").unwrap(), path, None));
        let healed = project.heal_paths(Path::new("/proj/novels"), |_| true);
        assert_eq!(healed, 1);
        assert_eq!(project.find("a.txt").unwrap().path(), Path::new("/proj/novels/a.txt"));
    }

    #[test]
    fn test_record_last_viewed_requires_novel() {
        let mut project = Project::new();
        assert!(project.record_last_viewed("x.txt", 0).is_err());
    }
}
