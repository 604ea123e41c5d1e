use std::sync::LazyLock;
use regex::Regex;
use url::Url;
use crate::errors::NavGuardError;

static IPV4_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("static regex")
});

pub fn is_ipv4_literal(host: &str) -> bool {
    IPV4_LITERAL.is_match(host)
}

/// Lowercase a hostname and drop a trailing root dot and a leading `www.`.
pub fn normalize_host(host: &str) -> String {
    let lower = host.trim().trim_end_matches('.').to_ascii_lowercase();
    match lower.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => lower,
    }
}

/// Parse a navigation target, accepting only http and https.
pub fn parse_web_url(raw: &str) -> Result<Url, NavGuardError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(NavGuardError::InvalidUrl(format!("unsupported scheme '{}' in {}", other, raw))),
    }
}

pub fn is_web_url(raw: &str) -> bool {
    parse_web_url(raw).is_ok()
}
