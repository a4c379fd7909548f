//! Merge Commands

/// 合并工程内所有小说
#[derive(Debug, Clone, Default)]
pub struct MergeProject;
