use std::collections::BTreeSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::errors::NavGuardError;
use crate::utils::{is_ipv4_literal, parse_web_url};

/// Cookie reduced to the attributes shown on the decision surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieDescriptor {
    pub name: String,
    pub domain: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
    #[serde(default = "default_cookie_path")]
    pub path: String,
}

fn default_cookie_path() -> String {
    "/".to_string()
}

impl CookieDescriptor {
    pub fn lacks_security_flags(&self) -> bool {
        !self.secure || !self.http_only
    }
}

/// Structural metrics of the navigation URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UrlFeatures {
    pub length: usize,
    pub has_ip_address: bool,
    pub subdomain_count: usize,
    pub has_port: bool,
    pub has_query_params: bool,
    pub has_fragment: bool,
    pub has_at_symbol: bool,
    pub has_double_slash: bool,
    pub special_char_count: usize,
}

impl UrlFeatures {
    pub fn extract(raw: &str, parsed: &url::Url) -> Self {
        let host = parsed.host_str().unwrap_or("");
        Self {
            length: raw.len(),
            has_ip_address: is_ipv4_literal(host),
            subdomain_count: host.split('.').count().saturating_sub(2),
            has_port: parsed.port().is_some(),
            has_query_params: parsed.query().is_some_and(|q| !q.is_empty()),
            has_fragment: parsed.fragment().is_some_and(|f| !f.is_empty()),
            has_at_symbol: raw.contains('@'),
            // Past the scheme separator.
            has_double_slash: raw.get(8..).is_some_and(|rest| rest.contains("//")),
            special_char_count: raw.chars().filter(|c| "@-?=%&#".contains(*c)).count(),
        }
    }
}

/// Everything the decision surface shows about the destination besides the verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContext {
    pub url: String,
    pub hostname: String,
    pub protocol: String,
    pub port: String,
    pub path: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub fragment: String,
    #[serde(default)]
    pub cookies: Vec<CookieDescriptor>,
    #[serde(default)]
    pub third_party_domains: BTreeSet<String>,
    #[serde(default)]
    pub url_features: UrlFeatures,
    pub analyzed_at: DateTime<Utc>,
}

impl SiteContext {
    pub fn build(raw: &str, cookies: Vec<CookieDescriptor>) -> Result<Self, NavGuardError> {
        let parsed = parse_web_url(raw)?;
        let hostname = parsed
            .host_str()
            .ok_or_else(|| NavGuardError::InvalidUrl(format!("no host in {}", raw)))?
            .to_string();

        let port = match parsed.port() {
            Some(p) => p.to_string(),
            None if parsed.scheme() == "https" => "443".to_string(),
            None => "80".to_string(),
        };

        let third_party_domains = cookies
            .iter()
            .filter(|c| !c.domain.contains(hostname.as_str()))
            .map(|c| c.domain.clone())
            .collect();

        Ok(Self {
            url: raw.to_string(),
            protocol: format!("{}:", parsed.scheme()),
            port,
            path: parsed.path().to_string(),
            query: parsed.query().map(|q| format!("?{}", q)).unwrap_or_default(),
            fragment: parsed.fragment().map(|f| format!("#{}", f)).unwrap_or_default(),
            url_features: UrlFeatures::extract(raw, &parsed),
            hostname,
            cookies,
            third_party_domains,
            analyzed_at: Utc::now(),
        })
    }

    /// Neutral context used when the real one could not be built or decoded.
    pub fn unknown(raw: &str) -> Self {
        Self {
            url: raw.to_string(),
            hostname: "Unknown".to_string(),
            protocol: "unknown:".to_string(),
            port: String::new(),
            path: "/".to_string(),
            query: String::new(),
            fragment: String::new(),
            cookies: Vec::new(),
            third_party_domains: BTreeSet::new(),
            url_features: UrlFeatures::default(),
            analyzed_at: Utc::now(),
        }
    }

    pub fn is_secure(&self) -> bool {
        self.protocol == "https:"
    }

    pub fn insecure_cookie_count(&self) -> usize {
        self.cookies.iter().filter(|c| c.lacks_security_flags()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(name: &str, domain: &str) -> CookieDescriptor {
        CookieDescriptor {
            name: name.to_string(),
            domain: domain.to_string(),
            secure: true,
            http_only: false,
            same_site: Some("lax".to_string()),
            path: "/".to_string(),
        }
    }

    #[test]
    fn test_build_basic_fields() {
        let ctx = SiteContext::build("https://shop.example.org/cart?item=3#top", vec![]).unwrap();
        assert_eq!(ctx.hostname, "shop.example.org");
        assert_eq!(ctx.protocol, "https:");
        assert_eq!(ctx.port, "443");
        assert_eq!(ctx.path, "/cart");
        assert_eq!(ctx.query, "?item=3");
        assert_eq!(ctx.fragment, "#top");
        assert!(ctx.is_secure());
    }

    #[test]
    fn test_port_defaults_and_explicit() {
        assert_eq!(SiteContext::build("http://example.org/", vec![]).unwrap().port, "80");
        assert_eq!(SiteContext::build("http://example.org:8080/", vec![]).unwrap().port, "8080");
    }

    #[test]
    fn test_third_party_domains_are_distinct() {
        let cookies = vec![
            cookie("sid", ".example.org"),
            cookie("ad", ".tracker.net"),
            cookie("ad2", ".tracker.net"),
            cookie("cdn", "cdn.other.io"),
        ];
        let ctx = SiteContext::build("https://example.org/", cookies).unwrap();
        let third: Vec<&str> = ctx.third_party_domains.iter().map(|s| s.as_str()).collect();
        assert_eq!(third, vec![".tracker.net", "cdn.other.io"]);
        assert_eq!(ctx.insecure_cookie_count(), 4);
    }

    #[test]
    fn test_url_features() {
        let raw = "http://192.168.1.1:8080/a//b?x=1&y=2";
        let ctx = SiteContext::build(raw, vec![]).unwrap();
        let f = &ctx.url_features;
        assert_eq!(f.length, raw.len());
        assert!(f.has_ip_address);
        assert!(f.has_port);
        assert!(f.has_query_params);
        assert!(!f.has_fragment);
        assert!(f.has_double_slash);
        assert!(!f.has_at_symbol);
        assert_eq!(f.special_char_count, 4);
    }

    #[test]
    fn test_subdomain_count_floors_at_zero() {
        let ctx = SiteContext::build("http://localhost/", vec![]).unwrap();
        assert_eq!(ctx.url_features.subdomain_count, 0);
        let ctx = SiteContext::build("https://a.b.example.org/", vec![]).unwrap();
        assert_eq!(ctx.url_features.subdomain_count, 2);
    }

    #[test]
    fn test_non_web_url_rejected() {
        assert!(SiteContext::build("ftp://example.org/file", vec![]).is_err());
        assert!(SiteContext::build("::::", vec![]).is_err());
    }

    #[test]
    fn test_unknown_context() {
        let ctx = SiteContext::unknown("");
        assert_eq!(ctx.hostname, "Unknown");
        assert_eq!(ctx.protocol, "unknown:");
    }

    #[test]
    fn test_serializes_camel_case() {
        let ctx = SiteContext::build("https://example.org/", vec![cookie("a", ".x.io")]).unwrap();
        let json = serde_json::to_value(&ctx).unwrap();
        assert!(json.get("thirdPartyDomains").is_some());
        assert_eq!(json["urlFeatures"]["hasIpAddress"], false);
        assert_eq!(json["cookies"][0]["httpOnly"], false);
    }
}
