// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// 规范化站点地址
///
/// 没有 scheme 时补上 `https://`，并去掉末尾的 `/`
pub fn normalize_url(url: &str) -> String {
    let with_scheme = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    with_scheme.trim_end_matches('/').to_string()
}

/// 提取顶级域名，用作编码探测的提示
pub fn top_level_domain(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    host.rsplit('.')
        .next()
        .filter(|tld| !tld.is_empty() && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|tld| tld.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
    }

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize_url("http://example.com/"), "http://example.com");
        assert_eq!(normalize_url("https://example.com/a//"), "https://example.com/a");
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(
            normalize_url("https://example.com/path"),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_normalize_does_not_lowercase() {
        assert_eq!(normalize_url("Example.COM/"), "https://Example.COM");
    }

    #[test]
    fn test_top_level_domain() {
        assert_eq!(top_level_domain("https://sub.example.ru/page"), Some("ru".to_string()));
        assert_eq!(top_level_domain("https://пример.рф"), None);
        assert_eq!(top_level_domain("http://127.0.0.1:8080"), None);
        assert_eq!(top_level_domain("not a url"), None);
    }
}
