//! 编码探测
//!
//! 顺序: BOM → 合法 UTF-8 → chardetng 统计猜测（限定在候选编码内）→ 候选编码按畸形序列数打分
//!
//! 最终结果的畸形序列比例必须在阈值内

use chardetng::EncodingDetector;
use encoding_rs::{DecoderResult, Encoding, GB18030, GBK, UTF_8};
use std::path::Path;

use super::EncodingPolicy;
use crate::application::ports::StorageError;

/// 探测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub encoding: &'static Encoding,
    /// BOM 字节数（无 BOM 为 0）
    pub bom_length: usize,
    /// 解码时丢弃的畸形序列数
    pub malformed: usize,
}

impl Detection {
    fn clean(encoding: &'static Encoding, bom_length: usize) -> Self {
        Self {
            encoding,
            bom_length,
            malformed: 0,
        }
    }
}

/// 宽松解码：丢弃畸形序列，返回 (文本, 畸形序列数)
pub fn decode_dropping_malformed(encoding: &'static Encoding, bytes: &[u8]) -> (String, usize) {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut output = String::new();
    let mut malformed = 0;
    let mut input = bytes;

    loop {
        let needed = decoder
            .max_utf8_buffer_length_without_replacement(input.len())
            .unwrap_or(input.len() * 3 + 16);
        output.reserve(needed);

        let (result, read) = decoder.decode_to_string_without_replacement(input, &mut output, true);
        input = &input[read..];

        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => continue,
            DecoderResult::Malformed(_, _) => malformed += 1,
        }
    }

    (output, malformed)
}

/// GBK 是 GB18030 的子集，两者互相匹配
fn same_family(candidate: &'static Encoding, guessed: &'static Encoding) -> bool {
    candidate == guessed
        || (candidate == GB18030 && guessed == GBK)
        || (candidate == GBK && guessed == GB18030)
}

fn scored(encoding: &'static Encoding, bytes: &[u8]) -> Detection {
    let (_, malformed) = decode_dropping_malformed(encoding, bytes);
    Detection {
        encoding,
        bom_length: 0,
        malformed,
    }
}

/// 统计猜测，猜测结果不在候选列表中时返回 None
fn guess_candidate(bytes: &[u8], candidates: &[&'static Encoding]) -> Option<Detection> {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed = detector.guess(None, false);

    let encoding = candidates
        .iter()
        .copied()
        .find(|&candidate| same_family(candidate, guessed));

    tracing::trace!(
        guessed = guessed.name(),
        accepted = encoding.is_some(),
        "Encoding guessed"
    );

    encoding.map(|encoding| scored(encoding, bytes))
}

/// 为全部候选打分，取畸形序列最少者，相同时取靠前者
fn best_candidate(bytes: &[u8], candidates: &[&'static Encoding]) -> Option<Detection> {
    candidates
        .iter()
        .map(|&encoding| scored(encoding, bytes))
        .min_by_key(|detection| detection.malformed)
}

/// 探测字节序列的编码，无法确定时返回 None
///
/// 空输入视为 UTF-8
pub fn detect(bytes: &[u8], policy: &EncodingPolicy) -> Option<Detection> {
    if bytes.is_empty() {
        return Some(Detection::clean(UTF_8, 0));
    }

    if let Some((encoding, bom_length)) = Encoding::for_bom(bytes) {
        return Some(Detection::clean(encoding, bom_length));
    }

    if Encoding::utf8_valid_up_to(bytes) == bytes.len() {
        return Some(Detection::clean(UTF_8, 0));
    }

    let detection = guess_candidate(bytes, &policy.candidates)
        .or_else(|| best_candidate(bytes, &policy.candidates))?;

    let ratio = detection.malformed as f64 / bytes.len() as f64;
    (ratio <= policy.max_malformed_ratio).then_some(detection)
}

/// 将文件转换为 UTF-8
///
/// output 为 None 或与 path 相同时原地覆盖；已是无 BOM 的 UTF-8 且原地转换时不改写文件
pub fn convert_to_utf8(
    path: &Path,
    output: Option<&Path>,
    policy: &EncodingPolicy,
) -> Result<Detection, StorageError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => StorageError::Io(format!("{}: {}", path.display(), e)),
    })?;

    let detection = detect(&bytes, policy)
        .ok_or_else(|| StorageError::EncodingUndetected(path.display().to_string()))?;

    let target = output.unwrap_or(path);
    let already_utf8 = detection.encoding == UTF_8 && detection.bom_length == 0;

    if already_utf8 && target == path {
        return Ok(detection);
    }

    let body = &bytes[detection.bom_length..];
    let converted = if already_utf8 {
        body.to_vec()
    } else {
        decode_dropping_malformed(detection.encoding, body).0.into_bytes()
    };

    std::fs::write(target, converted)
        .map_err(|e| StorageError::Io(format!("{}: {}", target.display(), e)))?;

    tracing::debug!(
        path = %path.display(),
        encoding = detection.encoding.name(),
        malformed = detection.malformed,
        "Converted file to UTF-8"
    );

    Ok(detection)
}

/// 解码文本：先按 UTF-8，失败后按回退编码严格解码
pub fn decode_with_fallback(
    bytes: Vec<u8>,
    fallback: &'static Encoding,
) -> Result<String, StorageError> {
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            let bytes = e.into_bytes();
            fallback
                .decode_without_bom_handling_and_without_replacement(&bytes)
                .map(|text| text.into_owned())
                .ok_or_else(|| {
                    StorageError::Decode(format!("neither UTF-8 nor {}", fallback.name()))
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{BIG5, GB18030, GBK, SHIFT_JIS, UTF_16LE};
    use tempfile::tempdir;

    const SAMPLE: &str = "第1章 开端\n从前有座山，山里有座庙。\n";

    #[test]
    fn test_detect_empty_as_utf8() {
        let detection = detect(&[], &EncodingPolicy::default()).unwrap();
        assert_eq!(detection.encoding, UTF_8);
    }

    #[test]
    fn test_detect_utf8() {
        let detection = detect(SAMPLE.as_bytes(), &EncodingPolicy::default()).unwrap();
        assert_eq!(detection, Detection::clean(UTF_8, 0));
    }

    #[test]
    fn test_detect_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(SAMPLE.as_bytes());
        let detection = detect(&bytes, &EncodingPolicy::default()).unwrap();
        assert_eq!(detection, Detection::clean(UTF_8, 3));

        let detection = detect(&[0xFF, 0xFE, 0x2C, 0x7B], &EncodingPolicy::default()).unwrap();
        assert_eq!(detection.encoding, UTF_16LE);
        assert_eq!(detection.bom_length, 2);
    }

    #[test]
    fn test_detect_gbk_family() {
        let (bytes, _, _) = GBK.encode(SAMPLE);
        let detection = detect(&bytes, &EncodingPolicy::default()).unwrap();
        assert_eq!(detection.encoding, GB18030);
        assert_eq!(detection.malformed, 0);
    }

    #[test]
    fn test_detect_big5_with_default_candidates() {
        let text = "第1章 開端\n從前有座山，山裡有座廟，廟裡有個老和尚在給小和尚講故事。\n他說：從前有座山，山裡有座廟。\n";
        let (bytes, _, _) = BIG5.encode(text);
        let detection = detect(&bytes, &EncodingPolicy::default()).unwrap();
        assert_eq!(detection.encoding, BIG5);
        assert_eq!(decode_dropping_malformed(detection.encoding, &bytes).0, text);
    }

    #[test]
    fn test_detect_shift_jis_with_default_candidates() {
        let text = "第1章 始まり\nむかしむかし、ある山の中に小さなお寺がありました。\nお寺には年をとったお坊さんが住んでいました。\n";
        let (bytes, _, _) = SHIFT_JIS.encode(text);
        let detection = detect(&bytes, &EncodingPolicy::default()).unwrap();
        assert_eq!(detection.encoding, SHIFT_JIS);
        assert_eq!(decode_dropping_malformed(detection.encoding, &bytes).0, text);
    }

    #[test]
    fn test_best_candidate_scores_every_candidate() {
        // 0x81 0x40 在 GBK 中是「丂」，在 Big5 中没有对应字符
        let bytes = [0x81, 0x40];
        assert_eq!(best_candidate(&bytes, &[BIG5, GBK]).unwrap().encoding, GBK);

        // 同分时保持候选顺序
        assert_eq!(best_candidate(b"plain", &[BIG5, GBK]).unwrap().encoding, BIG5);
        assert!(best_candidate(&bytes, &[]).is_none());
    }

    #[test]
    fn test_gbk_guess_matches_gb18030_candidate() {
        assert!(same_family(GB18030, GBK));
        assert!(same_family(GBK, GB18030));
        assert!(!same_family(BIG5, GBK));
    }

    #[test]
    fn test_undetectable_when_too_many_malformed() {
        // 0xFF 在 GBK 与 Shift_JIS 中都不是合法字节
        let bytes = vec![0xFF; 64];
        let policy = EncodingPolicy {
            candidates: vec![GBK, SHIFT_JIS],
            ..EncodingPolicy::default()
        };
        assert!(detect(&bytes, &policy).is_none());
    }

    #[test]
    fn test_decode_dropping_malformed_counts() {
        let mut bytes = SAMPLE.as_bytes().to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice("尾".as_bytes());
        let (text, malformed) = decode_dropping_malformed(UTF_8, &bytes);
        assert_eq!(malformed, 1);
        assert_eq!(text, format!("{}尾", SAMPLE));
    }

    #[test]
    fn test_convert_in_place_and_to_output() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("gbk.txt");
        let (bytes, _, _) = GBK.encode(SAMPLE);
        std::fs::write(&source, &bytes).unwrap();

        let copy = dir.path().join("copy.txt");
        convert_to_utf8(&source, Some(&copy), &EncodingPolicy::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&copy).unwrap(), SAMPLE);
        assert_eq!(std::fs::read(&source).unwrap(), bytes.to_vec());

        convert_to_utf8(&source, None, &EncodingPolicy::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&source).unwrap(), SAMPLE);
    }

    #[test]
    fn test_convert_strips_utf8_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bom.txt");
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(SAMPLE.as_bytes());
        std::fs::write(&path, &bytes).unwrap();

        convert_to_utf8(&path, None, &EncodingPolicy::default()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), SAMPLE.as_bytes());
    }

    #[test]
    fn test_convert_undetectable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.txt");
        std::fs::write(&path, vec![0xFF; 64]).unwrap();
        let policy = EncodingPolicy {
            candidates: vec![GBK],
            ..EncodingPolicy::default()
        };

        let result = convert_to_utf8(&path, None, &policy);
        assert!(matches!(result, Err(StorageError::EncodingUndetected(_))));
    }

    #[test]
    fn test_decode_with_fallback() {
        let (bytes, _, _) = GBK.encode(SAMPLE);
        assert_eq!(decode_with_fallback(bytes.to_vec(), GBK).unwrap(), SAMPLE);
        assert_eq!(decode_with_fallback(SAMPLE.as_bytes().to_vec(), GBK).unwrap(), SAMPLE);
        assert!(matches!(
            decode_with_fallback(vec![0xFF, 0xFF], GBK),
            Err(StorageError::Decode(_))
        ));
    }
}
