use serde::Serialize;
use crate::config::HeuristicWeights;
use crate::utils::is_ipv4_literal;

pub const SENSITIVE_KEYWORDS: &[&str] = &[
    "login", "verify", "account", "update", "secure", "banking", "confirm", "suspend",
];

pub const IMPERSONATED_BRANDS: &[&str] = &[
    "google", "facebook", "paypal", "amazon", "microsoft", "apple", "netflix", "instagram",
];

const LONG_URL_CHARS: usize = 75;
const MAX_HOST_LABELS: usize = 4;
const MAX_DOTS: usize = 5;

/// Result of the local fallback scorer. The score is an uncapped sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeuristicReport {
    pub score: u32,
    pub findings: Vec<String>,
    pub warnings: Vec<String>,
}

impl HeuristicReport {
    fn add(&mut self, weight: u32, finding: String, warning: Option<String>) {
        self.score = self.score.saturating_add(weight);
        self.findings.push(finding);
        if let Some(w) = warning {
            self.warnings.push(w);
        }
    }
}

/// Sum every structural signal in the URL. All checks run; none short-circuits.
/// An unparseable URL scores zero.
pub fn local_heuristic_score(raw_url: &str, weights: &HeuristicWeights) -> HeuristicReport {
    let mut report = HeuristicReport::default();

    let parsed = match url::Url::parse(raw_url) {
        Ok(u) => u,
        Err(_) => return report,
    };
    let hostname = parsed.host_str().unwrap_or("").to_string();
    let host_lower = hostname.to_lowercase();
    let path_lower = parsed.path().to_lowercase();

    if is_ipv4_literal(&hostname) {
        report.add(
            weights.ip_host,
            "Using IP address instead of domain name".to_string(),
            Some("Legitimate sites rarely use IP addresses".to_string()),
        );
    }

    if let Some(port) = parsed.port() {
        if port != 80 && port != 443 {
            report.add(
                weights.non_standard_port,
                format!("Non-standard port: {}", port),
                Some("Unusual port number detected".to_string()),
            );
        }
    }

    let labels = hostname.split('.').count();
    if labels > MAX_HOST_LABELS {
        report.add(
            weights.excessive_subdomains,
            format!("{} subdomains detected", labels),
            Some("Excessive subdomains (possible phishing)".to_string()),
        );
    }

    if hostname.contains('@') || hostname.split('-').count() > 3 {
        report.add(
            weights.suspicious_host_chars,
            "Suspicious characters in domain".to_string(),
            Some("Unusual domain characters".to_string()),
        );
    }

    let found: Vec<&str> = SENSITIVE_KEYWORDS
        .iter()
        .copied()
        .filter(|k| host_lower.contains(k) || path_lower.contains(k))
        .collect();
    if !found.is_empty() {
        report.add(
            weights.keyword.saturating_mul(found.len() as u32),
            format!("Phishing keywords: {}", found.join(", ")),
            Some("Contains common phishing keywords".to_string()),
        );
    }

    for brand in IMPERSONATED_BRANDS {
        if host_lower.contains(brand)
            && !host_lower.ends_with(&format!("{}.com", brand))
            && !host_lower.ends_with(&format!("{}.net", brand))
        {
            report.add(
                weights.typosquat,
                format!("Possible typosquatting: {}", brand),
                Some(format!("May be impersonating {}", brand)),
            );
        }
    }

    if raw_url.len() > LONG_URL_CHARS {
        report.add(
            weights.long_url,
            format!("Unusually long URL ({} characters)", raw_url.len()),
            None,
        );
    }

    if raw_url.contains('@') {
        report.add(
            weights.at_symbol,
            "@ symbol in URL (domain hiding technique)".to_string(),
            Some("URL contains @ symbol - HIGH RISK".to_string()),
        );
    }

    let dots = raw_url.matches('.').count();
    if dots > MAX_DOTS {
        report.add(
            weights.excessive_dots,
            format!("Excessive dots in URL ({})", dots),
            None,
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(url: &str) -> HeuristicReport {
        local_heuristic_score(url, &HeuristicWeights::default())
    }

    #[test]
    fn test_clean_url_scores_zero() {
        let r = score("https://example.org/");
        assert_eq!(r.score, 0);
        assert!(r.findings.is_empty());
    }

    #[test]
    fn test_ip_host() {
        let r = score("http://10.0.0.5/");
        assert_eq!(r.score, 30);
    }

    #[test]
    fn test_non_standard_port() {
        assert_eq!(score("http://example.org:8080/").score, 15);
        assert_eq!(score("http://example.org:443/").score, 0);
    }

    #[test]
    fn test_excessive_labels() {
        assert_eq!(score("http://a.b.c.example.org/").score, 20);
        assert_eq!(score("http://b.c.example.org/").score, 0);
    }

    #[test]
    fn test_hyphen_segments() {
        assert_eq!(score("http://a-b-c-d.org/").score, 25);
        assert_eq!(score("http://a-b-c.org/").score, 0);
    }

    #[test]
    fn test_keywords_add_per_match() {
        let r = score("http://example.org/login/confirm");
        assert_eq!(r.score, 20);
        assert!(r.findings[0].contains("login"));
        assert!(r.findings[0].contains("confirm"));
    }

    #[test]
    fn test_typosquat_per_brand() {
        let r = score("http://paypal-amazon.example.org/");
        assert_eq!(r.score, 80);
        assert_eq!(score("http://shop.amazon.com/").score, 0);
        assert_eq!(score("http://cdn.netflix.net/").score, 0);
    }

    #[test]
    fn test_long_url() {
        let url = format!("http://example.org/{}", "a".repeat(70));
        assert_eq!(score(&url).score, 10);
    }

    #[test]
    fn test_at_symbol() {
        let r = score("http://user@example.org/");
        assert_eq!(r.score, 35);
        assert!(r.warnings.iter().any(|w| w.contains("HIGH RISK")));
    }

    #[test]
    fn test_excessive_dots() {
        assert_eq!(score("http://example.org/a.b.c.d.e.f").score, 15);
    }

    #[test]
    fn test_all_signals_sum() {
        // ip 30 + port 15 + keywords login,verify 20 + @ 35
        let r = score("http://admin@192.168.1.1:8080/login-verify");
        assert_eq!(r.score, 100);
        assert_eq!(r.findings.len(), 4);
    }

    #[test]
    fn test_custom_weights() {
        let weights = HeuristicWeights { ip_host: 50, ..Default::default() };
        assert_eq!(local_heuristic_score("http://10.0.0.5/", &weights).score, 50);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let weights = HeuristicWeights {
            ip_host: u32::MAX,
            keyword: u32::MAX,
            at_symbol: u32::MAX,
            ..Default::default()
        };
        let r = local_heuristic_score("http://admin@10.0.0.5/login-verify", &weights);
        assert_eq!(r.score, u32::MAX);
    }

    #[test]
    fn test_unparseable_scores_zero() {
        assert_eq!(score("not a url").score, 0);
    }
}
