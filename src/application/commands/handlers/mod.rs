//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod merge_handlers;
mod novel_handlers;
mod project_handlers;

pub use merge_handlers::*;
pub use novel_handlers::*;
pub use project_handlers::*;
