use std::sync::LazyLock;
use regex::RegexSet;
use serde::Serialize;

pub const BASE_SCORE: u32 = 85;
pub const PER_TERM_BONUS: u32 = 2;
pub const MAX_BONUS: u32 = 10;

/// Tokens associated with phishing pages. Internal hyphens are flexible:
/// they also match `_`, `.` or nothing, so no term may collapse to a bare
/// brand or product name.
pub static PHISHING_TERMS: &[&str] = &[
    // Urgency and account-threat language
    "account-suspended", "account-locked", "account-disabled", "account-limited", "account-on-hold",
    "account-restricted", "urgent-action", "action-required", "immediate-action", "verify-immediately",
    "respond-immediately", "unusual-activity", "suspicious-activity", "unusual-sign-in",
    "security-alert", "security-notice", "security-warning", "final-notice", "last-warning",
    "expires-today", "expire-today", "password-expired", "password-expiry", "payment-failed",
    "payment-declined", "billing-problem", "billing-issue", "unauthorized-access", "unauthorized-login",
    "unauthorized-transaction", "reactivate-account", "restore-account", "unlock-account",
    "limited-access", "access-restricted", "service-suspended", "subscription-expired",
    "subscription-cancelled", "mailbox-full", "mailbox-quota", "storage-full", "deactivation-notice",
    "termination-notice", "avoid-suspension", "prevent-suspension", "within-24-hours",
    "confirm-within",
    // Credential harvesting phrases
    "login-verify", "verify-login", "signin-verify", "verify-signin", "verify-account",
    "account-verify", "account-verification", "verify-your-account", "confirm-account",
    "confirm-your-account", "confirm-identity", "identity-verification", "validate-account",
    "account-validation", "update-account", "account-update", "update-billing", "update-payment",
    "billing-update", "payment-update", "update-your-information", "secure-login", "login-secure",
    "secure-signin", "secure-account", "secure-update", "secure-verify", "webscr", "cmd=_login",
    "login-submit", "signin-submit", "password-reset-confirm", "reset-password-now", "enter-password",
    "credential-update", "credentials-update", "sign-in-to-continue", "relogin",
    "session-expired", "session-timeout", "auth-confirm", "verify-session", "walletconnect-sync", "seed-phrase", "recovery-phrase", "private-key-verify", "wallet-validate",
    "wallet-recovery", "claim-reward", "claim-airdrop", "free-gift", "gift-card-claim",
    "you-have-won", "prize-claim", "tax-refund", "refund-claim", "refund-request-form",
    "ssn-verify", "card-verify", "verify-card", "cvv-check", "-verify", "verify-",
    // Typosquat spellings
    "paypa1", "paypall", "paipal", "paypai", "paypol", "g00gle", "gooogle",
    "googel", "goggle-login", "gogle-", "micros0ft", "microsofft", "mircosoft", "rnicrosoft",
    "micosoft", "amaz0n", "amazom", "arnazon", "amazn-", "faceb00k", "facebok", "faecbook",
    "facebo0k", "app1e", "appie-id", "apple-id-locked", "icloud-unlock", "netfllx", "netfiix",
    "nettflix", "instagran", "lnstagram", "instagrarn", "linkedln", "linkedin-job-offer",
    "twltter", "0utlook", "outlo0k", "hotmai1", "yah00", "wellsfarg0", "wellsfargo-secure",
    "chasebank-", "chase-online-secure", "bankofamerica-secure", "bankofarnerica", "citibank-secure",
    "steamcommunlty", "steancommunity", "dropbox-share-doc", "dropboxx", "gmai1",
    "whatsap-", "coinbasse", "blnance", "binnance", "metamaskk",
    // Brand impersonation markers
    "paypal-verify", "paypal-login", "paypal-secure", "paypal-update", "paypal-account",
    "paypal-resolution", "paypal-limited", "paypal-confirm", "apple-id-verify", "appleid-verify",
    "apple-support-", "apple-id-support", "icloud-verify", "icloud-login", "itunes-billing",
    "amazon-verify", "amazon-security", "amazon-account-update", "amazon-prime-renew",
    "amazon-order-cancel", "microsoft-verify", "microsoft-security-alert", "microsoft-account-team",
    "office-365-verify", "office365-login", "outlook-verify", "outlook-web-access", "netflix-update",
    "netflix-payment", "netflix-account-hold", "netflix-billing", "facebook-verify", "facebook-security",
    "facebook-recovery", "instagram-verify", "instagram-copyright", "instagram-badge",
    "whatsapp-verify", "google-verify", "google-security-alert", "gmail-verify", "youtube-copyright-strike",
    "chase-verify", "wellsfargo-verify", "bankofamerica-verify", "citi-verify", "hsbc-verify",
    "barclays-verify", "santander-verify", "dhl-delivery", "dhl-parcel", "fedex-delivery",
    "fedex-tracking-update", "usps-delivery", "usps-redelivery", "ups-delivery-failed",
    "parcel-redelivery", "package-held", "customs-fee", "irs-refund", "irs-verify", "hmrc-refund",
    "gov-refund", "coinbase-verify", "binance-verify", "metamask-verify", "metamask-restore",
    "trustwallet-verify", "ledger-recover", "ledger-live-update", "steam-gift", "discord-nitro-free",
    "docusign-document", "sharepoint-document", "onedrive-shared-file", "adobe-document-view",
    "wetransfer-download", "zoom-meeting-verify",
];

static TERM_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(PHISHING_TERMS.iter().map(|t| flexible_pattern(t)))
        .expect("phishing terms compile to valid patterns")
});

/// Build the pattern for one dictionary term. Only hyphens between two
/// non-hyphen characters are relaxed; leading and trailing hyphens stay literal.
pub fn flexible_pattern(term: &str) -> String {
    let chars: Vec<char> = term.chars().collect();
    let mut pattern = String::with_capacity(term.len() * 2);
    let mut literal = String::new();

    for (i, &c) in chars.iter().enumerate() {
        let internal = c == '-'
            && i > 0
            && i + 1 < chars.len()
            && chars[i - 1] != '-'
            && chars[i + 1] != '-';
        if internal {
            pattern.push_str(&regex::escape(&literal));
            literal.clear();
            pattern.push_str("[-_.]?");
        } else {
            literal.push(c);
        }
    }
    pattern.push_str(&regex::escape(&literal));
    pattern
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenylistMatch {
    pub terms: Vec<String>,
    pub score: u32,
}

pub fn score_for(match_count: usize) -> u32 {
    let bonus = (PER_TERM_BONUS as usize).saturating_mul(match_count).min(MAX_BONUS as usize) as u32;
    BASE_SCORE + bonus
}

/// Test the lowercased hostname, path and full URL against the dictionary.
/// Each term is reported once, in dictionary order.
pub fn match_denylist(raw_url: &str) -> Option<DenylistMatch> {
    let full = raw_url.to_lowercase();
    let (host, path) = match url::Url::parse(&full) {
        Ok(parsed) => (
            parsed.host_str().unwrap_or("").to_string(),
            parsed.path().to_string(),
        ),
        Err(_) => (String::new(), String::new()),
    };

    let mut hits = vec![false; PHISHING_TERMS.len()];
    for haystack in [host.as_str(), path.as_str(), full.as_str()] {
        if haystack.is_empty() {
            continue;
        }
        for idx in TERM_SET.matches(haystack).iter() {
            hits[idx] = true;
        }
    }

    let terms: Vec<String> = hits
        .iter()
        .enumerate()
        .filter(|(_, hit)| **hit)
        .map(|(idx, _)| PHISHING_TERMS[idx].to_string())
        .collect();

    if terms.is_empty() {
        return None;
    }

    Some(DenylistMatch {
        score: score_for(terms.len()),
        terms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flexible_pattern_relaxes_internal_hyphens_only() {
        let inner = regex::Regex::new(&flexible_pattern("paypal-verify")).unwrap();
        assert!(inner.is_match("paypal_verify"));
        assert!(inner.is_match("paypal.verify"));
        assert!(inner.is_match("paypalverify"));
        assert!(!inner.is_match("paypal--verify"));

        let leading = regex::Regex::new(&flexible_pattern("-verify")).unwrap();
        assert!(leading.is_match("login-verify"));
        assert!(!leading.is_match("loginverify"));

        let special = regex::Regex::new(&flexible_pattern("cmd=_login")).unwrap();
        assert!(special.is_match("/cgi-bin/webscr?cmd=_login"));
    }

    #[test]
    fn test_literal_match() {
        let m = match_denylist("http://evil.example/paypal-verify/index.html").unwrap();
        assert!(m.terms.contains(&"paypal-verify".to_string()));
    }

    #[test]
    fn test_obfuscated_separators_match() {
        for url in [
            "http://evil.example/paypal_verify",
            "http://paypal.verify.evil.example/",
            "http://evil.example/paypalverify",
        ] {
            let m = match_denylist(url).unwrap_or_else(|| panic!("{} should match", url));
            assert!(m.terms.contains(&"paypal-verify".to_string()), "{}", url);
        }
    }

    #[test]
    fn test_every_hyphenated_term_matches_with_separator_variants() {
        for term in PHISHING_TERMS.iter().filter(|t| t.trim_matches('-').contains('-')) {
            let inner = term.trim_matches('-');
            let lead = &term[..term.len() - term.trim_start_matches('-').len()];
            let trail = &term[term.trim_end_matches('-').len()..];
            for sep in ["_", ".", ""] {
                let variant = format!("{}{}{}", lead, inner.replace('-', sep), trail);
                let url = format!("http://host.invalid/x/{}", variant);
                let m = match_denylist(&url)
                    .unwrap_or_else(|| panic!("term {} should match variant {}", term, variant));
                assert!(m.terms.contains(&term.to_string()), "term {} missing for {}", term, variant);
            }
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert!(match_denylist("http://EVIL.example/PayPal-Verify").is_some());
    }

    #[test]
    fn test_clean_url_does_not_match() {
        assert!(match_denylist("https://unknown-site.org/products").is_none());
        assert!(match_denylist("https://blog.example.net/articles/rust-ownership").is_none());
    }

    #[test]
    fn test_score_bounds() {
        assert_eq!(score_for(1), 87);
        assert_eq!(score_for(3), 91);
        assert_eq!(score_for(5), 95);
        assert_eq!(score_for(40), 95);
    }

    #[test]
    fn test_ip_login_verify_scores_in_range() {
        let m = match_denylist("http://192.168.1.1/login-verify").unwrap();
        assert!(m.terms.contains(&"login-verify".to_string()));
        assert!((85..=95).contains(&m.score));
    }

    #[test]
    fn test_terms_reported_once() {
        let m = match_denylist("http://paypal-verify.example/paypal-verify").unwrap();
        let count = m.terms.iter().filter(|t| *t == "paypal-verify").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_brand_names_alone_do_not_match() {
        for url in [
            "https://www.paypalobjects.com/en_US/i/btn/btn_xpressCheckout.gif",
            "https://www.paypal-community.com/t5/help",
            "https://news.example.org/?ref=paypal",
            "https://walletconnect.com/",
        ] {
            assert!(match_denylist(url).is_none(), "{} should not match", url);
        }
    }

    #[test]
    fn test_no_term_collapses_to_a_brand_token() {
        let brands: Vec<&str> = crate::classifiers::heuristic::IMPERSONATED_BRANDS
            .iter()
            .copied()
            .chain(["walletconnect", "metamask", "coinbase", "icloud", "outlook"])
            .collect();
        for term in PHISHING_TERMS {
            let collapsed = term.trim_matches('-').replace('-', "");
            assert!(!brands.contains(&collapsed.as_str()), "term {} collapses to a brand", term);
        }
    }

    #[test]
    fn test_dictionary_has_hundreds_of_terms() {
        assert!(PHISHING_TERMS.len() >= 200);
    }
}
