use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use crate::config::InterceptorConfig;
use crate::decision::{to_surface_url, Decision, DecisionMessage, DecisionResponse, DeferredResponse};
use crate::errors::NavGuardError;
use crate::models::{AnalysisBundle, NavigationRequest, TabId};
use crate::pipeline::RiskPipeline;
use super::events::InterceptorEvent;
use super::host::BrowserHost;
use super::state::{ContinueOutcome, InterceptOutcome, InterceptorSnapshot, TabStateMachine};

#[derive(Debug, Clone)]
pub struct InterceptorSettings {
    pub decision_timeout: Duration,
    pub decision_surface_url: String,
    pub payload_param: String,
}

impl From<&InterceptorConfig> for InterceptorSettings {
    fn from(config: &InterceptorConfig) -> Self {
        Self {
            decision_timeout: config.decision_timeout(),
            decision_surface_url: config.decision_surface_url.clone(),
            payload_param: config.payload_param.clone(),
        }
    }
}

/// Single task owning the per-tab state. Analyses and timers run as
/// separate tasks and report back through the event channel.
pub struct InterceptorService {
    machine: TabStateMachine,
    settings: InterceptorSettings,
    pipeline: RiskPipeline,
    host: Arc<dyn BrowserHost>,
    tx: mpsc::UnboundedSender<InterceptorEvent>,
    rx: mpsc::UnboundedReceiver<InterceptorEvent>,
    cancel_token: CancellationToken,
}

impl InterceptorService {
    pub fn spawn(
        settings: InterceptorSettings,
        pipeline: RiskPipeline,
        host: Arc<dyn BrowserHost>,
    ) -> (InterceptorHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();
        let handle = InterceptorHandle {
            tx: tx.clone(),
            cancel_token: cancel_token.clone(),
        };
        let service = Self {
            machine: TabStateMachine::new(&settings.decision_surface_url),
            settings,
            pipeline,
            host,
            tx,
            rx,
            cancel_token,
        };
        (handle, tokio::spawn(service.run()))
    }

    async fn run(mut self) {
        info!(
            surface = %self.settings.decision_surface_url,
            timeout_secs = self.settings.decision_timeout.as_secs(),
            "Interceptor started"
        );
        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => break,
                event = self.rx.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => break,
                },
            }
        }
        info!("Interceptor stopped");
    }

    async fn handle_event(&mut self, event: InterceptorEvent) {
        match event {
            InterceptorEvent::Navigation { request, reply } => {
                let outcome = self.on_navigation(request);
                let _ = reply.send(outcome);
            }
            InterceptorEvent::AnalysisComplete { tab, generation, bundle } => {
                self.on_analysis_complete(tab, generation, *bundle).await;
            }
            InterceptorEvent::Decision { decision, reply } => {
                let response = self.on_decision(decision).await;
                let _ = reply.send(response);
            }
            InterceptorEvent::Timeout { tab, generation } => {
                if self.machine.expire(tab, generation) {
                    info!(tab_id = %tab, generation, "Decision window elapsed, pending navigation cleared");
                }
            }
            InterceptorEvent::TabClosed { tab } => {
                if self.machine.tab_closed(tab) {
                    debug!(tab_id = %tab, "Tab closed, state evicted");
                }
            }
            InterceptorEvent::TabReloading { tab } => {
                if let Some(entry) = self.machine.tab_reloading(tab) {
                    debug!(tab_id = %tab, url = %entry.url, "Tab reloading, pending navigation cleared");
                }
            }
            InterceptorEvent::TabLoading { tab, url } => {
                if let Some(entry) = self.machine.tab_loading(tab, &url) {
                    debug!(tab_id = %tab, url = %entry.url, loading = %url, "Tab left pending navigation");
                }
            }
            InterceptorEvent::Snapshot { reply } => {
                let _ = reply.send(self.machine.snapshot());
            }
        }
    }

    fn on_navigation(&mut self, request: NavigationRequest) -> InterceptOutcome {
        let outcome = self.machine.begin(&request);
        match &outcome {
            InterceptOutcome::Ignored { reason } => {
                debug!(tab_id = %request.tab_id, url = %request.url, ?reason, "Navigation ignored");
            }
            InterceptOutcome::Allowed => {
                info!(tab_id = %request.tab_id, url = %request.url, "Approved navigation proceeding");
            }
            InterceptOutcome::Intercepted { generation, evicted_stale } => {
                info!(
                    tab_id = %request.tab_id,
                    url = %request.url,
                    generation,
                    evicted_stale,
                    "Navigation intercepted"
                );
                self.spawn_analysis(request.tab_id, *generation, request.url.clone());
            }
        }
        outcome
    }

    fn spawn_analysis(&self, tab: TabId, generation: u64, url: String) {
        let pipeline = self.pipeline.clone();
        let host = self.host.clone();
        let tx = self.tx.clone();
        let token = self.cancel_token.clone();
        tokio::spawn(async move {
            tokio::select! {
                bundle = pipeline.analyze_with_host(host.as_ref(), &url) => {
                    let _ = tx.send(InterceptorEvent::AnalysisComplete {
                        tab,
                        generation,
                        bundle: Box::new(bundle),
                    });
                }
                _ = token.cancelled() => {}
            }
        });
    }

    fn spawn_timer(&self, tab: TabId, generation: u64) {
        let tx = self.tx.clone();
        let token = self.cancel_token.clone();
        let window = self.settings.decision_timeout;
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(window) => {
                    let _ = tx.send(InterceptorEvent::Timeout { tab, generation });
                }
                _ = token.cancelled() => {}
            }
        });
    }

    async fn on_analysis_complete(&mut self, tab: TabId, generation: u64, bundle: AnalysisBundle) {
        if !self.machine.complete_analysis(tab, generation, bundle.verdict.clone()) {
            debug!(tab_id = %tab, generation, "Analysis result superseded, dropped");
            return;
        }

        let surface = match to_surface_url(
            &self.settings.decision_surface_url,
            &self.settings.payload_param,
            &bundle,
        ) {
            Ok(surface) => surface,
            Err(e) => {
                error!(tab_id = %tab, error = %e, "Failed to encode decision payload");
                self.machine.expire(tab, generation);
                return;
            }
        };

        if let Err(e) = self.host.update_tab(tab, &surface).await {
            error!(tab_id = %tab, error = %e, "Failed to show decision surface");
            self.machine.expire(tab, generation);
            return;
        }

        info!(
            tab_id = %tab,
            generation,
            source = %bundle.verdict.source,
            risk_score = bundle.verdict.risk_score,
            "Awaiting decision"
        );
        self.spawn_timer(tab, generation);
    }

    async fn on_decision(&mut self, decision: Decision) -> DecisionResponse {
        match decision {
            Decision::Continue { tab, url } => match self.machine.continue_decision(tab, &url) {
                ContinueOutcome::NotPending => {
                    warn!(tab_id = %tab, url = %url, "Continue for a tab with nothing pending, ignored");
                    DecisionResponse::stale()
                }
                ContinueOutcome::Approved => match self.host.update_tab(tab, &url).await {
                    Ok(()) => {
                        info!(tab_id = %tab, url = %url, "User chose to continue");
                        DecisionResponse::success()
                    }
                    Err(e) => {
                        self.machine.revoke_allowed(tab, &url);
                        error!(tab_id = %tab, url = %url, error = %e, "Re-navigation failed, approval revoked");
                        DecisionResponse::rejected(e.to_string())
                    }
                },
            },
            Decision::Cancel { tab } => match self.machine.cancel_decision(tab) {
                None => {
                    warn!(tab_id = %tab, "Cancel for a tab with nothing pending, ignored");
                    DecisionResponse::stale()
                }
                Some(entry) => {
                    info!(tab_id = %tab, url = %entry.url, "User cancelled navigation");
                    match self.host.remove_tab(tab).await {
                        Ok(()) => DecisionResponse::success(),
                        Err(e) => {
                            warn!(tab_id = %tab, error = %e, "Failed to close tab");
                            DecisionResponse::rejected(e.to_string())
                        }
                    }
                }
            },
        }
    }
}

/// Cloneable front door to a running [`InterceptorService`].
#[derive(Clone)]
pub struct InterceptorHandle {
    tx: mpsc::UnboundedSender<InterceptorEvent>,
    cancel_token: CancellationToken,
}

impl InterceptorHandle {
    fn send(&self, event: InterceptorEvent) -> Result<(), NavGuardError> {
        self.tx
            .send(event)
            .map_err(|_| NavGuardError::ChannelClosed("interceptor is not running".to_string()))
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> InterceptorEvent,
    ) -> Result<T, NavGuardError> {
        let (reply, rx) = oneshot::channel();
        self.send(build(reply))?;
        rx.await
            .map_err(|_| NavGuardError::ChannelClosed("interceptor dropped the request".to_string()))
    }

    pub async fn intercept(&self, request: NavigationRequest) -> Result<InterceptOutcome, NavGuardError> {
        self.request(|reply| InterceptorEvent::Navigation { request, reply }).await
    }

    /// Validate and dispatch a decision. Protocol violations settle
    /// immediately without reaching the state machine.
    pub fn submit_decision(&self, sender: Option<TabId>, message: DecisionMessage) -> DeferredResponse {
        let decision = match message.attribute(sender) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(tab_id = ?sender, error = %e, "Decision rejected");
                let reason = match e {
                    NavGuardError::Protocol(reason) => reason,
                    other => other.to_string(),
                };
                return DeferredResponse::ready(DecisionResponse::rejected(reason));
            }
        };

        self.dispatch(decision)
    }

    /// Hand an already attributed decision to the service.
    pub fn dispatch(&self, decision: Decision) -> DeferredResponse {
        let (reply, deferred) = DeferredResponse::channel();
        if let Err(e) = self.send(InterceptorEvent::Decision { decision, reply }) {
            return DeferredResponse::ready(DecisionResponse::rejected(e.to_string()));
        }
        deferred
    }

    pub async fn resolve_continue(&self, tab: TabId, url: &str) -> DecisionResponse {
        self.submit_decision(Some(tab), DecisionMessage::Continue { url: Some(url.to_string()) })
            .recv()
            .await
    }

    pub async fn resolve_cancel(&self, tab: TabId) -> DecisionResponse {
        self.submit_decision(Some(tab), DecisionMessage::Cancel).recv().await
    }

    pub fn on_tab_closed(&self, tab: TabId) -> Result<(), NavGuardError> {
        self.send(InterceptorEvent::TabClosed { tab })
    }

    pub fn on_tab_reloading(&self, tab: TabId) -> Result<(), NavGuardError> {
        self.send(InterceptorEvent::TabReloading { tab })
    }

    pub fn on_tab_loading(&self, tab: TabId, url: &str) -> Result<(), NavGuardError> {
        self.send(InterceptorEvent::TabLoading { tab, url: url.to_string() })
    }

    pub async fn snapshot(&self) -> Result<InterceptorSnapshot, NavGuardError> {
        self.request(|reply| InterceptorEvent::Snapshot { reply }).await
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.cancel_token.is_cancelled() && !self.tx.is_closed()
    }
}
