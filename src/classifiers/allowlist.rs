use std::collections::HashSet;
use std::sync::LazyLock;
use serde::Serialize;
use crate::utils::normalize_host;

/// Registered domains of well-known legitimate services.
pub static TRUSTED_DOMAINS: &[&str] = &[
    "google.com", "google.co.uk", "google.de", "google.fr", "google.co.jp", "google.ca",
    "google.com.au", "google.co.in", "google.com.br", "youtube.com", "youtu.be", "gmail.com",
    "googleapis.com", "gstatic.com", "googleusercontent.com", "blogger.com", "android.com",
    "facebook.com", "fb.com", "messenger.com", "instagram.com", "whatsapp.com", "whatsapp.net",
    "threads.net", "meta.com", "oculus.com", "microsoft.com", "live.com", "outlook.com",
    "office.com", "office365.com", "microsoftonline.com", "bing.com", "msn.com", "skype.com",
    "azure.com", "windows.com", "xbox.com", "linkedin.com", "github.com", "githubusercontent.com",
    "visualstudio.com", "sharepoint.com", "onedrive.com", "apple.com", "icloud.com", "itunes.com",
    "me.com", "amazon.com", "amazon.co.uk", "amazon.de", "amazon.fr", "amazon.co.jp", "amazon.ca",
    "amazon.in", "amazon.com.au", "amazonaws.com", "aws.amazon.com", "primevideo.com",
    "audible.com", "imdb.com", "twitch.tv", "netflix.com", "spotify.com", "hulu.com", "disneyplus.com",
    "hbomax.com", "max.com", "paramountplus.com", "peacocktv.com", "crunchyroll.com", "soundcloud.com",
    "deezer.com", "pandora.com", "paypal.com", "paypal.me", "venmo.com", "stripe.com",
    "squareup.com", "cash.app", "wise.com", "revolut.com", "klarna.com", "chase.com", "bankofamerica.com",
    "wellsfargo.com", "citi.com", "citibank.com", "capitalone.com", "usbank.com", "pnc.com",
    "tdbank.com", "schwab.com", "fidelity.com", "vanguard.com", "americanexpress.com",
    "discover.com", "hsbc.com", "barclays.co.uk", "lloydsbank.com", "natwest.com", "santander.com",
    "ing.com", "bnpparibas.com", "ebay.com", "etsy.com", "walmart.com", "target.com", "bestbuy.com",
    "costco.com", "homedepot.com", "lowes.com", "ikea.com", "aliexpress.com", "alibaba.com",
    "shopify.com", "wayfair.com", "zalando.com", "rakuten.com", "mercadolibre.com", "twitter.com",
    "x.com", "t.co", "reddit.com", "redd.it", "pinterest.com", "tumblr.com", "quora.com",
    "discord.com", "discord.gg", "telegram.org", "signal.org", "snapchat.com", "tiktok.com",
    "vk.com", "weibo.com", "wikipedia.org", "wikimedia.org", "wiktionary.org", "wikidata.org",
    "mozilla.org", "firefox.com", "archive.org", "yahoo.com", "yahoo.co.jp", "aol.com",
    "duckduckgo.com", "baidu.com", "yandex.ru", "yandex.com", "naver.com", "ecosia.org",
    "dropbox.com", "box.com", "zoom.us", "slack.com", "atlassian.com", "atlassian.net",
    "bitbucket.org", "trello.com", "notion.so", "asana.com", "monday.com", "salesforce.com",
    "zendesk.com", "hubspot.com", "mailchimp.com", "adobe.com", "canva.com", "figma.com",
    "autodesk.com", "oracle.com", "ibm.com", "intel.com", "amd.com", "nvidia.com", "cisco.com",
    "dell.com", "hp.com", "lenovo.com", "samsung.com", "sony.com", "cloudflare.com", "akamai.com",
    "fastly.com", "digitalocean.com", "heroku.com", "vercel.com", "netlify.com", "gitlab.com",
    "stackoverflow.com", "stackexchange.com", "npmjs.com", "pypi.org", "rust-lang.org",
    "crates.io", "docs.rs", "python.org", "golang.org", "go.dev", "nodejs.org", "kernel.org",
    "debian.org", "ubuntu.com", "redhat.com", "docker.com", "nytimes.com", "washingtonpost.com",
    "wsj.com", "bbc.co.uk", "bbc.com", "cnn.com", "theguardian.com", "reuters.com", "apnews.com",
    "bloomberg.com", "forbes.com", "economist.com", "ft.com", "npr.org", "cnbc.com", "foxnews.com",
    "nbcnews.com", "abcnews.go.com", "usatoday.com", "time.com", "theverge.com", "wired.com",
    "arstechnica.com", "techcrunch.com", "booking.com", "airbnb.com", "expedia.com", "tripadvisor.com",
    "uber.com", "lyft.com", "doordash.com", "grubhub.com", "instacart.com", "kayak.com",
    "hotels.com", "coursera.org", "edx.org", "khanacademy.org", "udemy.com", "duolingo.com",
    "mit.edu", "stanford.edu", "harvard.edu", "berkeley.edu", "ox.ac.uk", "cam.ac.uk",
    "irs.gov", "usa.gov", "ssa.gov", "gov.uk", "canada.ca", "nih.gov", "cdc.gov", "who.int",
    "europa.eu", "un.org", "steampowered.com", "steamcommunity.com", "epicgames.com", "ea.com",
    "playstation.com", "nintendo.com", "roblox.com", "minecraft.net", "blizzard.com", "battle.net",
    "openai.com", "chatgpt.com", "anthropic.com", "claude.ai", "huggingface.co", "fedex.com",
    "ups.com", "usps.com", "dhl.com", "protonmail.com", "proton.me", "zoho.com", "fastmail.com",
    "mail.ru",
];

static TRUSTED_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| TRUSTED_DOMAINS.iter().copied().collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Exact,
    Subdomain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowlistMatch {
    pub matched_domain: String,
    pub match_type: MatchType,
}

/// Match a hostname against the trusted domains, exactly or on a dot
/// boundary. The most specific trusted suffix wins.
pub fn match_allowlist(hostname: &str) -> Option<AllowlistMatch> {
    let host = normalize_host(hostname);
    if host.is_empty() {
        return None;
    }

    if TRUSTED_SET.contains(host.as_str()) {
        return Some(AllowlistMatch {
            matched_domain: host,
            match_type: MatchType::Exact,
        });
    }

    let mut rest = host.as_str();
    while let Some(idx) = rest.find('.') {
        rest = &rest[idx + 1..];
        if TRUSTED_SET.contains(rest) {
            return Some(AllowlistMatch {
                matched_domain: rest.to_string(),
                match_type: MatchType::Subdomain,
            });
        }
    }

    None
}

pub fn is_legitimate(hostname: &str) -> bool {
    match_allowlist(hostname).is_some()
}
