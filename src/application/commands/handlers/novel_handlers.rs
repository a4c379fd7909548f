//! Novel Command Handlers

use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

use crate::application::commands::{DeleteNovel, ImportNovel, MarkChapterViewed, SetNovelOrder};
use crate::application::context::ProjectContext;
use crate::application::error::ApplicationError;
use crate::application::ports::{NovelStoragePort, ProjectStorePort};
use crate::domain::novel::{has_changed, normalized_file_name_of, Novel, NovelError, NovelName};

// ============================================================================
// Response DTOs
// ============================================================================

/// 导入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportOutcome {
    /// 新增小说
    Added,
    /// 已存在且内容变化，已更新
    Updated,
    /// 已存在且内容相同
    Unchanged,
}

/// 导入响应
#[derive(Debug, Clone, Serialize)]
pub struct ImportNovelResponse {
    pub name: String,
    pub outcome: ImportOutcome,
    pub md5: Option<String>,
}

/// 删除响应
#[derive(Debug, Clone, Serialize)]
pub struct DeleteNovelResponse {
    pub name: String,
    pub file_deleted: bool,
}

fn is_txt(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

// ============================================================================
// ImportNovel
// ============================================================================

/// ImportNovel Handler
///
/// 流程：暂存到 cache/ 并转为 UTF-8 → 按规范化文件名查重 →
/// 比较校验和决定新增、更新或跳过 → 清理暂存文件
pub struct ImportNovelHandler {
    store: Arc<dyn ProjectStorePort>,
    storage: Arc<dyn NovelStoragePort>,
}

impl ImportNovelHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>, storage: Arc<dyn NovelStoragePort>) -> Self {
        Self { store, storage }
    }

    pub fn handle(
        &self,
        ctx: &mut ProjectContext,
        command: ImportNovel,
    ) -> Result<ImportNovelResponse, ApplicationError> {
        let source = command.source;

        if !is_txt(&source) {
            return Err(NovelError::UnsupportedFile(source.display().to_string()).into());
        }
        if !self.storage.exists(&source) {
            return Err(ApplicationError::not_found(
                "File",
                source.display().to_string(),
            ));
        }

        let cache_dir = ctx.layout().cache_dir();
        self.storage.ensure_dir(&cache_dir)?;
        let staged = self.storage.copy_into(&source, &cache_dir)?;

        let result = self.import_staged(ctx, &staged);

        if let Err(e) = self.storage.remove(&staged) {
            tracing::warn!(staged = %staged.display(), error = %e, "Failed to clean staged file");
        }

        let response = result?;
        tracing::info!(
            source = %source.display(),
            novel = %response.name,
            outcome = ?response.outcome,
            "Novel imported"
        );
        Ok(response)
    }

    fn import_staged(
        &self,
        ctx: &mut ProjectContext,
        staged: &Path,
    ) -> Result<ImportNovelResponse, ApplicationError> {
        let key = normalized_file_name_of(staged).ok_or_else(|| {
            ApplicationError::validation(format!("无效的文件名: {}", staged.display()))
        })?;
        let novels_dir = ctx.layout().novels_dir();

        // 在副本上修改，保存成功后再提交到上下文
        let mut project = ctx.project().clone();
        let existing = project
            .find_by_file_key_mut(&key)
            .map(|novel| (novel.name().to_string(), novel.path().to_path_buf()));

        if let Some((name, stored_path)) = existing {
            let staged_md5 = self.storage.checksum(staged)?;
            let stored_md5 = self.storage.checksum(&stored_path)?;

            if !has_changed(stored_md5.as_ref(), staged_md5.as_ref()) {
                tracing::debug!(novel = %name, "Novel content unchanged");
                return Ok(ImportNovelResponse {
                    name,
                    outcome: ImportOutcome::Unchanged,
                    md5: stored_md5.map(|m| m.to_string()),
                });
            }

            let new_path = self.storage.copy_into(staged, &novels_dir)?;
            let md5 = self.storage.checksum(&new_path)?;
            if let Some(novel) = project.find_by_file_key_mut(&key) {
                novel.update_content(new_path, md5.clone());
            }
            self.store.save(ctx.layout(), &project)?;
            ctx.commit(project);

            return Ok(ImportNovelResponse {
                name,
                outcome: ImportOutcome::Updated,
                md5: md5.map(|m| m.to_string()),
            });
        }

        let new_path = self.storage.copy_into(staged, &novels_dir)?;
        let name =
            NovelName::from_path(&new_path).map_err(|e| NovelError::InvalidName(e.to_string()))?;
        let md5 = self.storage.checksum(&new_path)?;

        let novel = Novel::new(name.clone(), new_path, md5.clone());
        let outcome = if project.add(novel) {
            self.store.save(ctx.layout(), &project)?;
            ctx.commit(project);
            ImportOutcome::Added
        } else {
            ImportOutcome::Unchanged
        };

        Ok(ImportNovelResponse {
            name: name.to_string(),
            outcome,
            md5: md5.map(|m| m.to_string()),
        })
    }
}

// ============================================================================
// DeleteNovel
// ============================================================================

/// DeleteNovel Handler - 移除记录并删除 novels/ 下的文件（不可恢复）
///
/// 索引保存成功后才删除文件
pub struct DeleteNovelHandler {
    store: Arc<dyn ProjectStorePort>,
    storage: Arc<dyn NovelStoragePort>,
}

impl DeleteNovelHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>, storage: Arc<dyn NovelStoragePort>) -> Self {
        Self { store, storage }
    }

    pub fn handle(
        &self,
        ctx: &mut ProjectContext,
        command: DeleteNovel,
    ) -> Result<DeleteNovelResponse, ApplicationError> {
        let mut project = ctx.project().clone();
        let removed = project.remove(&command.name)?;
        self.store.save(ctx.layout(), &project)?;
        ctx.commit(project);

        let file_deleted = match self.storage.remove(removed.path()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    novel = %removed.name(),
                    path = %removed.path().display(),
                    error = %e,
                    "Failed to delete novel file"
                );
                false
            }
        };

        tracing::info!(novel = %removed.name(), file_deleted = file_deleted, "Novel deleted");

        Ok(DeleteNovelResponse {
            name: removed.name().to_string(),
            file_deleted,
        })
    }
}

// ============================================================================
// SetNovelOrder
// ============================================================================

/// SetNovelOrder Handler
pub struct SetNovelOrderHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl SetNovelOrderHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub fn handle(
        &self,
        ctx: &mut ProjectContext,
        command: SetNovelOrder,
    ) -> Result<(), ApplicationError> {
        let mut project = ctx.project().clone();
        project.set_order(&command.name, command.order)?;
        self.store.save(ctx.layout(), &project)?;
        ctx.commit(project);

        tracing::info!(novel = %command.name, order = command.order, "Novel order updated");
        Ok(())
    }
}

// ============================================================================
// MarkChapterViewed
// ============================================================================

/// MarkChapterViewed Handler
pub struct MarkChapterViewedHandler {
    store: Arc<dyn ProjectStorePort>,
}

impl MarkChapterViewedHandler {
    pub fn new(store: Arc<dyn ProjectStorePort>) -> Self {
        Self { store }
    }

    pub fn handle(
        &self,
        ctx: &mut ProjectContext,
        command: MarkChapterViewed,
    ) -> Result<(), ApplicationError> {
        if ctx.project().last_viewed_for(&command.novel) == Some(command.chapter_index) {
            return Ok(());
        }

        let mut project = ctx.project().clone();
        project.record_last_viewed(&command.novel, command.chapter_index)?;
        self.store.save(ctx.layout(), &project)?;
        ctx.commit(project);

        tracing::debug!(
            novel = %command.novel,
            chapter_index = command.chapter_index,
            "Last viewed chapter recorded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{adapters, failing_store, new_project, write_source};
    use tempfile::tempdir;

    #[test]
    fn test_import_adds_novel_with_normalized_name() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));
        let source = write_source(dir.path(), "我的  小说.txt", "第1章 开始\n正文\n");

        let handler = ImportNovelHandler::new(store.clone(), storage);
        let response = handler.handle(&mut ctx, ImportNovel { source }).unwrap();

        assert_eq!(response.outcome, ImportOutcome::Added);
        assert_eq!(response.name, "我的-小说.txt");
        assert!(response.md5.is_some());

        let novel = ctx.project().find("我的-小说.txt").unwrap();
        assert_eq!(
            novel.path(),
            ctx.layout().novels_dir().join("我的-小说.txt").as_path()
        );
        assert!(novel.path().is_file());

        // 暂存文件已清理
        assert!(!ctx.layout().cache_dir().join("我的-小说.txt").exists());

        // 已持久化
        let reloaded = store.load(ctx.layout()).unwrap();
        assert_eq!(reloaded.novel_count(), 1);
    }

    #[test]
    fn test_import_same_file_twice_is_unchanged() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));
        let source = write_source(dir.path(), "a.txt", "第1章\n内容\n");

        let handler = ImportNovelHandler::new(store, storage);
        handler
            .handle(&mut ctx, ImportNovel { source: source.clone() })
            .unwrap();
        let second = handler.handle(&mut ctx, ImportNovel { source }).unwrap();

        assert_eq!(second.outcome, ImportOutcome::Unchanged);
        assert_eq!(ctx.project().novel_count(), 1);
    }

    #[test]
    fn test_reimport_after_edit_updates_checksum() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));
        let source = write_source(dir.path(), "a.txt", "第1章\n内容\n");

        let handler = ImportNovelHandler::new(store, storage);
        let first = handler
            .handle(&mut ctx, ImportNovel { source: source.clone() })
            .unwrap();

        std::fs::write(&source, "第1章\n内容!\n").unwrap();
        let second = handler.handle(&mut ctx, ImportNovel { source }).unwrap();

        assert_eq!(second.outcome, ImportOutcome::Updated);
        assert_ne!(first.md5, second.md5);
        assert_eq!(
            ctx.project().find("a.txt").unwrap().md5().map(|m| m.to_string()),
            second.md5
        );
        let stored = std::fs::read_to_string(ctx.layout().novels_dir().join("a.txt")).unwrap();
        assert_eq!(stored, "第1章\n内容!\n");
    }

    #[test]
    fn test_import_variant_spelling_matches_existing() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));
        let handler = ImportNovelHandler::new(store, storage);

        let first = write_source(dir.path(), "a b.txt", "第1章\n");
        handler.handle(&mut ctx, ImportNovel { source: first }).unwrap();

        let other = dir.path().join("other");
        std::fs::create_dir_all(&other).unwrap();
        let second = write_source(&other, "a--b.txt", "第1章\n");
        let response = handler.handle(&mut ctx, ImportNovel { source: second }).unwrap();

        assert_eq!(response.outcome, ImportOutcome::Unchanged);
        assert_eq!(response.name, "a-b.txt");
        assert_eq!(ctx.project().novel_count(), 1);
    }

    #[test]
    fn test_import_converts_gbk_source() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));

        let (bytes, _, _) = encoding_rs::GBK.encode("第1章 开端\n从前有座山，山里有座庙。\n");
        let source = dir.path().join("gbk.txt");
        std::fs::write(&source, &bytes).unwrap();

        let handler = ImportNovelHandler::new(store, storage);
        handler.handle(&mut ctx, ImportNovel { source }).unwrap();

        let stored = std::fs::read_to_string(ctx.layout().novels_dir().join("gbk.txt")).unwrap();
        assert_eq!(stored, "第1章 开端\n从前有座山，山里有座庙。\n");
    }

    #[test]
    fn test_import_converts_big5_source() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));

        let text = "第1章 開端\n從前有座山，山裡有座廟，廟裡有個老和尚在給小和尚講故事。\n第2章 下山\n他說：從前有座山。\n";
        let (bytes, _, _) = encoding_rs::BIG5.encode(text);
        let source = dir.path().join("big5.txt");
        std::fs::write(&source, &bytes).unwrap();

        ImportNovelHandler::new(store, storage.clone())
            .handle(&mut ctx, ImportNovel { source })
            .unwrap();

        let stored = storage
            .read_text(&ctx.layout().novels_dir().join("big5.txt"))
            .unwrap();
        assert_eq!(stored.as_str(), text);
    }

    #[test]
    fn test_failed_save_leaves_context_untouched() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));
        let source = write_source(dir.path(), "a.txt", "第1章\n");
        ImportNovelHandler::new(store, storage.clone())
            .handle(&mut ctx, ImportNovel { source })
            .unwrap();
        let stored = ctx.layout().novels_dir().join("a.txt");

        let broken = failing_store();

        let result = SetNovelOrderHandler::new(broken.clone()).handle(
            &mut ctx,
            SetNovelOrder {
                name: "a.txt".to_string(),
                order: 7,
            },
        );
        assert!(matches!(result, Err(ApplicationError::StorageError(_))));
        assert_eq!(ctx.project().find("a.txt").unwrap().order(), 0);

        let result = MarkChapterViewedHandler::new(broken.clone()).handle(
            &mut ctx,
            MarkChapterViewed {
                novel: "a.txt".to_string(),
                chapter_index: 2,
            },
        );
        assert!(result.is_err());
        assert_eq!(ctx.project().last_viewed_for("a.txt"), None);

        let result = DeleteNovelHandler::new(broken.clone(), storage.clone()).handle(
            &mut ctx,
            DeleteNovel {
                name: "a.txt".to_string(),
            },
        );
        assert!(result.is_err());
        assert_eq!(ctx.project().novel_count(), 1);
        assert!(stored.exists());

        let other = write_source(dir.path(), "b.txt", "第1章\n");
        let result = ImportNovelHandler::new(broken, storage)
            .handle(&mut ctx, ImportNovel { source: other });
        assert!(result.is_err());
        assert!(ctx.project().find("b.txt").is_none());
    }

    #[test]
    fn test_import_rejects_non_txt() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));
        let source = write_source(dir.path(), "a.md", "第1章\n");

        let handler = ImportNovelHandler::new(store, storage);
        let result = handler.handle(&mut ctx, ImportNovel { source });
        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert!(ctx.project().is_empty());
    }

    #[test]
    fn test_import_missing_source() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));

        let handler = ImportNovelHandler::new(store, storage);
        let result = handler.handle(
            &mut ctx,
            ImportNovel {
                source: dir.path().join("missing.txt"),
            },
        );
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }

    #[test]
    fn test_delete_removes_file_and_record() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));
        let source = write_source(dir.path(), "a.txt", "第1章\n");
        ImportNovelHandler::new(store.clone(), storage.clone())
            .handle(&mut ctx, ImportNovel { source })
            .unwrap();
        let stored = ctx.layout().novels_dir().join("a.txt");
        assert!(stored.exists());

        let handler = DeleteNovelHandler::new(store.clone(), storage);
        let response = handler
            .handle(
                &mut ctx,
                DeleteNovel {
                    name: "a.txt".to_string(),
                },
            )
            .unwrap();

        assert!(response.file_deleted);
        assert!(!stored.exists());
        assert!(ctx.project().is_empty());
        assert!(store.load(ctx.layout()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_name_leaves_project() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));
        let source = write_source(dir.path(), "a.txt", "第1章\n");
        ImportNovelHandler::new(store.clone(), storage.clone())
            .handle(&mut ctx, ImportNovel { source })
            .unwrap();

        let handler = DeleteNovelHandler::new(store, storage);
        let result = handler.handle(
            &mut ctx,
            DeleteNovel {
                name: "b.txt".to_string(),
            },
        );

        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
        assert_eq!(ctx.project().novel_count(), 1);
        assert!(ctx.layout().novels_dir().join("a.txt").exists());
    }

    #[test]
    fn test_set_order_and_mark_viewed_persist() {
        let dir = tempdir().unwrap();
        let (store, storage) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));
        let source = write_source(dir.path(), "a.txt", "第1章\n");
        ImportNovelHandler::new(store.clone(), storage)
            .handle(&mut ctx, ImportNovel { source })
            .unwrap();

        SetNovelOrderHandler::new(store.clone())
            .handle(
                &mut ctx,
                SetNovelOrder {
                    name: "a.txt".to_string(),
                    order: -2,
                },
            )
            .unwrap();
        MarkChapterViewedHandler::new(store.clone())
            .handle(
                &mut ctx,
                MarkChapterViewed {
                    novel: "a.txt".to_string(),
                    chapter_index: 4,
                },
            )
            .unwrap();

        let reloaded = store.load(ctx.layout()).unwrap();
        assert_eq!(reloaded.find("a.txt").unwrap().order(), -2);
        assert_eq!(reloaded.last_viewed_for("a.txt"), Some(4));
    }

    #[test]
    fn test_set_order_unknown_novel() {
        let dir = tempdir().unwrap();
        let (store, _) = adapters();
        let mut ctx = new_project(&dir.path().join("proj"));

        let result = SetNovelOrderHandler::new(store).handle(
            &mut ctx,
            SetNovelOrder {
                name: "nope.txt".to_string(),
                order: 1,
            },
        );
        assert!(matches!(result, Err(ApplicationError::NotFound { .. })));
    }
}
