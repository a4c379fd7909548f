//! 编码规范化适配器
//!
//! 探测文本文件编码并转换为 UTF-8

mod detector;

pub use detector::{
    convert_to_utf8, decode_dropping_malformed, decode_with_fallback, detect, Detection,
};

use encoding_rs::{Encoding, BIG5, GB18030, GBK, SHIFT_JIS};

/// 默认候选编码
pub const DEFAULT_CANDIDATE_ENCODINGS: [&str; 3] = ["GB18030", "Big5", "Shift_JIS"];

/// 默认允许的畸形序列比例
pub const DEFAULT_MAX_MALFORMED_RATIO: f64 = 0.01;

/// 按 WHATWG 标签查找编码
pub fn resolve_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// 编码探测与回退策略
#[derive(Debug, Clone)]
pub struct EncodingPolicy {
    /// UTF-8 校验失败后可接受的编码，统计猜测不在其中时按顺序打分
    pub candidates: Vec<&'static Encoding>,
    /// 最佳候选允许的畸形序列数 / 字节数
    pub max_malformed_ratio: f64,
    /// 读取文本时 UTF-8 失败后的回退编码
    pub fallback: &'static Encoding,
}

impl Default for EncodingPolicy {
    fn default() -> Self {
        Self {
            candidates: vec![GB18030, BIG5, SHIFT_JIS],
            max_malformed_ratio: DEFAULT_MAX_MALFORMED_RATIO,
            fallback: GBK,
        }
    }
}

impl EncodingPolicy {
    /// 从配置中的编码标签构建
    pub fn from_labels(
        candidates: &[String],
        max_malformed_ratio: f64,
        fallback: &str,
    ) -> Result<Self, String> {
        let candidates = candidates
            .iter()
            .map(|label| resolve_label(label).ok_or_else(|| format!("未知编码: {}", label)))
            .collect::<Result<Vec<_>, _>>()?;
        let fallback = resolve_label(fallback).ok_or_else(|| format!("未知编码: {}", fallback))?;

        Ok(Self {
            candidates,
            max_malformed_ratio,
            fallback,
        })
    }
}
