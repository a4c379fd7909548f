//! Project Queries

/// 获取当前工程概要
#[derive(Debug, Clone, Default)]
pub struct GetProjectSummary;
