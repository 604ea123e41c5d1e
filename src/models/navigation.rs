use serde::{Deserialize, Serialize};
use super::site_context::SiteContext;
use super::verdict::Verdict;

/// Frame id the browser assigns to a tab's top-level document.
pub const TOP_LEVEL_FRAME: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TabId {
    fn from(id: u32) -> Self {
        TabId(id)
    }
}

/// A navigation event as delivered by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequest {
    pub tab_id: TabId,
    pub url: String,
    #[serde(default)]
    pub frame_id: u32,
}

impl NavigationRequest {
    pub fn top_level(tab_id: impl Into<TabId>, url: &str) -> Self {
        Self {
            tab_id: tab_id.into(),
            url: url.to_string(),
            frame_id: TOP_LEVEL_FRAME,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.frame_id == TOP_LEVEL_FRAME
    }
}

/// Site context and verdict travelling together to the decision surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBundle {
    pub context: SiteContext,
    pub verdict: Verdict,
}

impl AnalysisBundle {
    /// Neutral bundle: unknown site, zero score, no data.
    pub fn unknown() -> Self {
        Self {
            context: SiteContext::unknown(""),
            verdict: Verdict::unavailable(),
        }
    }
}
