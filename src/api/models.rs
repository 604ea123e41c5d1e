use serde::{Deserialize, Serialize};
use crate::models::{AnalysisBundle, CookieDescriptor, RiskLevel, TabId};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationBody {
    pub tab_id: TabId,
    pub url: String,
    #[serde(default)]
    pub frame_id: u32,
    /// Cookie snapshot for `url`, supplied by the extension.
    pub cookies: Option<Vec<CookieDescriptor>>,
}

#[derive(Deserialize, Default)]
pub struct LoadingBody {
    pub url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBody {
    pub url: String,
    #[serde(default)]
    pub cookies: Vec<CookieDescriptor>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    #[serde(flatten)]
    pub bundle: AnalysisBundle,
    pub display_level: Option<RiskLevel>,
    pub source_label: &'static str,
    pub requires_confirmation: bool,
}
