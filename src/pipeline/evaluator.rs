use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use futures::FutureExt;
use tracing::{debug, error, info, warn};
use crate::classifiers::{local_heuristic_score, match_allowlist, match_denylist};
use crate::config::{NavGuardConfig, RiskThresholds, ScoringConfig};
use crate::errors::NavGuardError;
use crate::interceptor::BrowserHost;
use crate::models::{AnalysisBundle, CookieDescriptor, SiteContext, Verdict};
use crate::oracle::{score_with_oracle, HttpOracle, OracleOutcome, RiskOracle};
use super::stage::Stage;

/// Ordered allowlist → denylist → oracle → heuristic evaluation.
///
/// Holds no per-call state, so one instance is shared by every tab.
#[derive(Clone)]
pub struct RiskPipeline {
    oracle: Option<Arc<dyn RiskOracle>>,
    scoring: ScoringConfig,
}

impl RiskPipeline {
    /// `None` disables the oracle stage; evaluation falls through to the heuristic.
    pub fn new(oracle: Option<Arc<dyn RiskOracle>>, scoring: ScoringConfig) -> Self {
        Self { oracle, scoring }
    }

    pub fn from_config(config: &NavGuardConfig) -> Result<Self, NavGuardError> {
        let oracle: Option<Arc<dyn RiskOracle>> = if config.oracle.enabled {
            Some(Arc::new(HttpOracle::new(&config.oracle)?))
        } else {
            None
        };
        Ok(Self::new(oracle, config.scoring.clone()))
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.scoring.thresholds
    }

    pub fn oracle_enabled(&self) -> bool {
        self.oracle.is_some()
    }

    /// Run the stages in order and return the first verdict produced.
    pub async fn evaluate(&self, url: &str) -> Verdict {
        let (stage, verdict) = self.run_stages(url).await;
        info!(
            url = %url,
            stage = stage.definition().display_name,
            source = %verdict.source,
            risk_score = verdict.risk_score,
            "Verdict computed"
        );
        verdict
    }

    async fn run_stages(&self, url: &str) -> (Stage, Verdict) {
        let hostname = url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string));

        if let Some(hit) = hostname.as_deref().and_then(match_allowlist) {
            debug!(url = %url, domain = %hit.matched_domain, "Allowlist match");
            return (Stage::Allowlist, Verdict::trusted(&hit.matched_domain));
        }

        if let Some(hit) = match_denylist(url) {
            debug!(url = %url, terms = ?hit.terms, "Denylist match, skipping oracle");
            return (Stage::Denylist, Verdict::quick_check(hit.score, hit.terms));
        }

        let mut carried_warnings = Vec::new();
        if let Some(oracle) = &self.oracle {
            match score_with_oracle(oracle.as_ref(), url).await {
                OracleOutcome::Scored(verdict) => return (Stage::Oracle, verdict),
                OracleOutcome::Unavailable { warnings, .. } => carried_warnings = warnings,
            }
        }

        let report = local_heuristic_score(url, &self.scoring.heuristic);
        carried_warnings.extend(report.warnings);
        (
            Stage::Heuristic,
            Verdict::heuristic(report.score, report.findings, carried_warnings),
        )
    }

    /// Build the site context and verdict together. Always yields a bundle:
    /// any failure or panic becomes the "no data" error verdict.
    pub async fn analyze(&self, url: &str, cookies: Vec<CookieDescriptor>) -> AnalysisBundle {
        let run = AssertUnwindSafe(async {
            let context = SiteContext::build(url, cookies)?;
            let verdict = self.evaluate(url).await;
            Ok::<_, NavGuardError>(AnalysisBundle { context, verdict })
        });

        let failure = match run.catch_unwind().await {
            Ok(Ok(bundle)) => return bundle,
            Ok(Err(e)) => e,
            Err(_) => NavGuardError::Analysis("analysis task panicked".to_string()),
        };
        let class = failure.classify();
        error!(url = %url, error = %failure, kind = ?class.kind, "Analysis failed, emitting error verdict");
        Self::failed_bundle(url)
    }

    /// Like [`analyze`](Self::analyze), enumerating cookies from the host first.
    /// A cookie failure leaves the cookie list empty and keeps the verdict.
    pub async fn analyze_with_host(&self, host: &dyn BrowserHost, url: &str) -> AnalysisBundle {
        let cookies = match host.cookies_for_url(url).await {
            Ok(cookies) => cookies,
            Err(e) => {
                warn!(url = %url, error = %e, "Cookie enumeration failed");
                Vec::new()
            }
        };
        self.analyze(url, cookies).await
    }

    fn failed_bundle(url: &str) -> AnalysisBundle {
        AnalysisBundle {
            context: SiteContext::unknown(url),
            verdict: Verdict::unavailable(),
        }
    }
}
