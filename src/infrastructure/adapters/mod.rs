//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod encoding;
pub mod storage;

pub use encoding::EncodingPolicy;
pub use storage::FileNovelStorage;
