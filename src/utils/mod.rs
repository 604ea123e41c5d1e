pub mod web_url;

pub use web_url::{is_ipv4_literal, is_web_url, normalize_host, parse_web_url};
