//! Charset recovery on realistic inputs

use encoding_rs::{BIG5, GB18030, GBK, UTF_16LE};
use keyterm_core::{Config, DecodeStage, Decoder, DecoderConfig, Input};
use std::fs;
use tempfile::TempDir;

const SIMPLIFIED: &str = "我爱北京天安门，天安门上太阳升。伟大领袖毛主席，指引我们向前进。\
北京是中华人民共和国的首都，也是全国的政治中心和文化中心。";

const TRADITIONAL: &str = "臺北市是中華民國的首都，位於臺灣北部的臺北盆地。\
臺北市的歷史悠久，文化資產豐富，是全臺灣的政治與經濟中心。";

fn candidates_only() -> Decoder {
    Decoder::with_config(DecoderConfig::default().detect(false))
}

#[test]
fn test_detected_gbk() {
    let text = SIMPLIFIED.repeat(4);
    let (raw, _, _) = GBK.encode(&text);
    let decoded = Decoder::new().decode(&raw);
    assert_eq!(decoded.text, text);
    assert!(!decoded.is_lossy());
}

#[test]
fn test_gbk_through_candidate_chain() {
    let (raw, _, _) = GBK.encode(SIMPLIFIED);
    let decoded = candidates_only().decode(&raw);
    assert_eq!(decoded.text, SIMPLIFIED);
    assert_eq!(decoded.stage, DecodeStage::Candidate);
}

#[test]
fn test_big5_with_big5_first() {
    let (raw, _, had_errors) = BIG5.encode(TRADITIONAL);
    assert!(!had_errors);

    let config = DecoderConfig::with_candidates(["utf-8", "big5", "gb18030"])
        .unwrap()
        .detect(false);
    let decoded = Decoder::with_config(config).decode(&raw);
    assert_eq!(decoded.text, TRADITIONAL);
    assert_eq!(decoded.encoding, "Big5");
}

#[test]
fn test_utf16_bom_is_detected() {
    let mut raw = vec![0xFF, 0xFE];
    for unit in "北京欢迎你".encode_utf16() {
        raw.extend_from_slice(&unit.to_le_bytes());
    }

    let decoded = Decoder::new().decode(&raw);
    assert_eq!(decoded.text, "北京欢迎你");
    assert_eq!(decoded.encoding, UTF_16LE.name());
    assert_eq!(decoded.stage, DecodeStage::Detected);
}

#[test]
fn test_truncated_multibyte_falls_back() {
    let mut raw = SIMPLIFIED.as_bytes().to_vec();
    raw.push(0xE4);
    raw.push(0xFF);

    let decoded = candidates_only().decode(&raw);
    assert!(!decoded.text.is_empty());
}

#[test]
fn test_binary_input_never_fails() {
    let raw: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let decoded = Decoder::new().decode(&raw);
    assert!(!decoded.text.is_empty());
}

#[test]
fn test_unmappable_bytes_are_replaced() {
    let decoded = candidates_only().decode(&[b'a', 0xFF, b'b']);
    assert!(decoded.is_lossy());
    assert_eq!(decoded.encoding, GB18030.name());
    assert_eq!(decoded.text, "a\u{FFFD}b");
}

#[test]
fn test_gbk_with_corrupt_byte_keeps_hits() {
    let text = "我爱北京天安门，北京是首都。北京欢迎你！".repeat(5);
    let mut raw = GBK.encode(&text).0.into_owned();
    raw.push(0xFF);

    let decoded = Decoder::new().decode(&raw);
    assert!(decoded.is_lossy());
    assert_eq!(decoded.encoding, "gb18030");
    assert!(decoded.text.starts_with(&text));
    assert_eq!(decoded.text.matches("北京").count(), 15);
}

#[test]
fn test_gb18030_file_via_config() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("gb18030.txt");
    let (raw, _, _) = GB18030.encode(SIMPLIFIED);
    fs::write(&file_path, &raw).unwrap();

    let config = Config::builder()
        .candidates(["gb18030"])
        .detect(false)
        .build()
        .unwrap();
    let decoded = Input::from_file(&file_path)
        .decode(&Decoder::with_config(config.decoder().clone()))
        .unwrap();
    assert_eq!(decoded.text, SIMPLIFIED);
    assert_eq!(decoded.encoding, "gb18030");
}
