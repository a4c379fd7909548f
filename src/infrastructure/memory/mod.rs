//! Memory Layer - In-Memory State Management
//!
//! 持有进程内唯一打开的工程

mod project_session;

pub use project_session::InMemoryProjectSession;
