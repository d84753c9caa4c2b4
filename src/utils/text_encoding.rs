// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use tracing::{debug, warn};

/// 只在文档开头查找 `<meta charset>` 声明
const META_SNIFF_LIMIT: usize = 1024;

static META_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("meta charset pattern is valid")
});

/// 解码后的响应体
#[derive(Debug, Clone)]
pub struct DecodedBody {
    /// UTF-8 文本
    pub text: String,
    /// 实际使用的编码名称
    pub encoding: &'static str,
    /// 解码时是否替换了非法字节序列
    pub had_errors: bool,
}

/// 将原始响应字节解码为 UTF-8 文本
///
/// 编码按以下顺序确定：
/// 1. `Content-Type` 头中的 charset
/// 2. 文档开头的 `<meta charset>` / `http-equiv` 声明
/// 3. 合法的 UTF-8
/// 4. chardetng 统计猜测（以顶级域名作为提示）
///
/// 非法字节序列会被替换，不会返回错误。
pub fn decode_body(bytes: &[u8], content_type: Option<&str>, tld: Option<&str>) -> DecodedBody {
    let encoding = charset_from_content_type(content_type)
        .or_else(|| charset_from_meta(bytes))
        .unwrap_or_else(|| guess_encoding(bytes, tld));

    // decode() 会优先识别 BOM
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = actual.name(), "Body contained malformed byte sequences");
    }
    debug!(encoding = actual.name(), bytes = bytes.len(), "Decoded response body");

    DecodedBody {
        text: text.into_owned(),
        encoding: actual.name(),
        had_errors,
    }
}

/// 从 Content-Type 头中解析 charset
pub fn charset_from_content_type(content_type: Option<&str>) -> Option<&'static Encoding> {
    let content_type = content_type?;
    let lower = content_type.to_ascii_lowercase();
    let start = lower.find("charset=")? + "charset=".len();
    let label = lower[start..]
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'');
    Encoding::for_label(label.as_bytes())
}

fn charset_from_meta(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let captures = META_CHARSET.captures(head)?;
    Encoding::for_label(captures.get(1)?.as_bytes())
}

fn guess_encoding(bytes: &[u8], tld: Option<&str>) -> &'static Encoding {
    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(tld.map(str::as_bytes), true);
    debug!("Guessed encoding: {}", encoding.name());
    encoding
}
