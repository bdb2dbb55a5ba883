//! Scan controller: the screen state machine.
//!
//! Drives one validate-then-scan session at a time through
//! `Idle -> Validating -> Scanning -> Success | Failure` and exposes the
//! resulting [`ScreenView`] to the presentation layer.
//!
//! Every session gets a fresh [`SessionId`]. Async completions (progress
//! ticks, report responses, the success pause) carry the id of the session
//! that started them and are dropped when a newer submission has taken over.

use crate::credentials::CredentialResolver;
use crate::error::ScanError;
use crate::progress::{ProgressHandle, ProgressSettings, ProgressSimulator, PROGRESS_MAX};
use crate::requester::ReportRequester;
use crate::validator::validate;
use chrono::{DateTime, Utc};
use numscope_core::{AppConfig, IntelReport, ParsedNumber, ScanConfig, SessionId};
use numscope_llm::GeminiFactory;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::watch;
use zeroize::Zeroizing;

/// Phase of the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing submitted yet
    Idle,
    /// Input is being validated
    Validating,
    /// Report request in flight
    Scanning,
    /// Report available
    Success,
    /// Session ended with an error message
    Failure,
}

impl Phase {
    /// Whether the session has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenView {
    /// Session this view belongs to
    pub session: SessionId,
    /// Current phase
    pub phase: Phase,
    /// Cosmetic progress, 0-100
    pub progress: u8,
    /// User-facing error message
    pub error: Option<String>,
    /// Finished report
    pub report: Option<IntelReport>,
    /// Number being scanned
    pub parsed: Option<ParsedNumber>,
    /// Set when no API key could be resolved
    pub needs_manual_key: bool,
    /// When the view last changed
    pub updated_at: DateTime<Utc>,
}

impl ScreenView {
    fn new(session: SessionId, phase: Phase) -> Self {
        Self {
            session,
            phase,
            progress: 0,
            error: None,
            report: None,
            parsed: None,
            needs_manual_key: false,
            updated_at: Utc::now(),
        }
    }
}

/// Timing of a session outside the progress simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPacing {
    /// Progress timer settings
    pub progress: ProgressSettings,
    /// Pause between a successful response and showing the report
    pub success_pause: Duration,
}

impl From<&ScanConfig> for ScanPacing {
    fn from(config: &ScanConfig) -> Self {
        Self {
            progress: ProgressSettings::from(config),
            success_pause: config.success_pause(),
        }
    }
}

struct ControllerState {
    view: ScreenView,
    progress: Option<ProgressHandle>,
    manual_key: Option<Zeroizing<String>>,
}

impl ControllerState {
    fn stop_progress(&mut self) {
        if let Some(mut handle) = self.progress.take() {
            handle.stop();
        }
    }
}

struct Shared {
    state: Mutex<ControllerState>,
    view_tx: watch::Sender<ScreenView>,
    requester: ReportRequester,
    pacing: ScanPacing,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state
            .lock()
            .expect("Mutex poisoned: another thread panicked while holding the scan state")
    }

    /// Apply `update` if `session` is still current. Returns false for a
    /// superseded session.
    fn update_current<F>(&self, session: SessionId, update: F) -> bool
    where
        F: FnOnce(&mut ControllerState),
    {
        let mut state = self.lock();
        if state.view.session != session {
            return false;
        }
        update(&mut state);
        state.view.updated_at = Utc::now();
        self.view_tx.send_replace(state.view.clone());
        true
    }
}

/// Orchestrates validation, report fetching and progress for one screen.
///
/// Cloning is cheap; clones share the same session slot.
#[derive(Clone)]
pub struct ScanController {
    shared: Arc<Shared>,
}

impl ScanController {
    /// Create a controller around a requester.
    #[must_use]
    pub fn new(requester: ReportRequester, pacing: ScanPacing) -> Self {
        let view = ScreenView::new(SessionId::default(), Phase::Idle);
        let (view_tx, _) = watch::channel(view.clone());

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ControllerState {
                    view,
                    progress: None,
                    manual_key: None,
                }),
                view_tx,
                requester,
                pacing,
            }),
        }
    }

    /// Create a controller talking to Gemini with the given configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let factory = Arc::new(GeminiFactory::new(
            config.llm.base_url.clone(),
            config.llm.timeout_secs,
        ));
        let credentials = CredentialResolver::from_env(config.llm.api_key.clone());
        let requester = ReportRequester::new(factory, credentials, &config.llm, &config.scan);
        Self::new(requester, ScanPacing::from(&config.scan))
    }

    /// Current view.
    #[must_use]
    pub fn snapshot(&self) -> ScreenView {
        self.shared.lock().view.clone()
    }

    /// Subscribe to view changes. Rapid intermediate views may be coalesced.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScreenView> {
        self.shared.view_tx.subscribe()
    }

    /// Set or clear the manually entered API key used by later submissions.
    pub fn set_manual_key(&self, key: Option<String>) {
        let key = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(Zeroizing::new);
        self.shared.lock().manual_key = key;
    }

    /// Start a new session for `raw`.
    ///
    /// Any session in progress is superseded: its progress timer stops and
    /// its eventual response is discarded. Validation happens synchronously;
    /// the report request runs on a spawned task, so this must be called
    /// from within a tokio runtime.
    pub fn submit(&self, raw: &str) -> SessionHandle {
        let session = {
            let mut state = self.shared.lock();
            state.stop_progress();
            let session = state.view.session.next();
            state.view = ScreenView::new(session, Phase::Validating);
            self.shared.view_tx.send_replace(state.view.clone());
            session
        };
        let handle = SessionHandle {
            session,
            rx: self.subscribe(),
        };

        tracing::info!(%session, "validating input");

        let parsed = match validate(raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::info!(%session, "validation failed: {}", err);
                self.shared
                    .update_current(session, |state| apply_failure(state, &err));
                return handle;
            }
        };

        let mut manual_key = None;
        let started = self.shared.update_current(session, |state| {
            state.view.phase = Phase::Scanning;
            state.view.progress = 0;
            state.view.parsed = Some(parsed.clone());
            state.progress = Some(ProgressSimulator::start(
                self.shared.pacing.progress,
                progress_sink(Arc::downgrade(&self.shared), session),
            ));
            manual_key = state.manual_key.clone();
        });
        if !started {
            return handle;
        }

        tracing::info!(
            %session,
            country = %parsed.country_code,
            line_type = %parsed.line_type,
            "scanning"
        );

        let shared = self.shared.clone();
        tokio::spawn(async move {
            run_scan(shared, session, parsed, manual_key).await;
        });

        handle
    }
}

fn progress_sink(shared: Weak<Shared>, session: SessionId) -> impl Fn(u8) + Send + 'static {
    move |value| {
        if let Some(shared) = shared.upgrade() {
            shared.update_current(session, |state| {
                if state.view.phase == Phase::Scanning && value > state.view.progress {
                    state.view.progress = value;
                }
            });
        }
    }
}

async fn run_scan(
    shared: Arc<Shared>,
    session: SessionId,
    parsed: ParsedNumber,
    manual_key: Option<Zeroizing<String>>,
) {
    let result = shared
        .requester
        .request_report(&parsed, manual_key.as_deref().map(String::as_str))
        .await;

    match result {
        Ok(report) => {
            let current = shared.update_current(session, |state| {
                state.stop_progress();
                state.view.progress = PROGRESS_MAX;
            });
            if !current {
                tracing::debug!(%session, "discarding report for superseded session");
                return;
            }

            tokio::time::sleep(shared.pacing.success_pause).await;

            let applied = shared.update_current(session, |state| {
                state.view.phase = Phase::Success;
                state.view.report = Some(report);
            });
            if applied {
                tracing::info!(%session, "report ready");
            }
        }
        Err(err) => {
            let applied = shared.update_current(session, |state| apply_failure(state, &err));
            if applied {
                tracing::info!(%session, "scan failed: {}", err);
            } else {
                tracing::debug!(%session, "discarding failure for superseded session");
            }
        }
    }
}

fn apply_failure(state: &mut ControllerState, err: &ScanError) {
    state.stop_progress();
    state.view.phase = Phase::Failure;
    state.view.error = Some(err.user_message());
    state.view.needs_manual_key = err.needs_manual_key();
}

/// Handle to one submitted session.
#[derive(Debug)]
pub struct SessionHandle {
    session: SessionId,
    rx: watch::Receiver<ScreenView>,
}

impl SessionHandle {
    /// Id of the session this handle tracks.
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Wait until the session reaches a terminal phase.
    ///
    /// Returns `None` if a newer submission superseded it first.
    pub async fn finished(mut self) -> Option<ScreenView> {
        loop {
            {
                let view = self.rx.borrow_and_update();
                if view.session != self.session {
                    return None;
                }
                if view.phase.is_terminal() {
                    return Some(view.clone());
                }
            }
            if self.rx.changed().await.is_err() {
                return None;
            }
        }
    }
}
