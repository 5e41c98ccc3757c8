//! Debate controller use case
//!
//! Owns the single active debate: starts it, drives its rounds and closing
//! phases turn by turn, and tears it down.
//!
//! # Flow
//!
//! ```text
//! start(request)  validate -> end previous -> create sessions -> idle
//! run()           debating -> rounds -> [summarizing] -> [concluding] -> completed
//! end_session()   destroy sessions, drop session and observers
//! shutdown()      end_session() + release the backend
//! ```
//!
//! The active-session slot is a short-lived `std::sync::Mutex`; it is never
//! held across an `.await` and never held while observers run.

use crate::ports::conversation_gateway::{ConversationGateway, GatewayError};
use crate::ports::debate_observer::DebateObserver;
use crate::use_cases::event_bus::EventBus;
use crate::use_cases::participant_sessions::ParticipantSessions;
use committee_domain::{
    CLOSING_ROUND, ClosingPhase, DEFAULT_RESPONSE_LANGUAGE, DebateConfig, DebateEvent,
    DebatePromptTemplate, DebateSession, DebateSnapshot, DebateStatus, DomainError, Participant,
    StartDebateRequest, Statement, TurnScheduler,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors returned by [`DebateController`]
#[derive(Error, Debug)]
pub enum DebateError {
    #[error("Invalid debate configuration: {0}")]
    Validation(DomainError),

    #[error("No active debate session")]
    NoActiveSession,

    #[error("Debate session is {actual}, expected {expected}")]
    InvalidState {
        expected: DebateStatus,
        actual: DebateStatus,
    },

    #[error("Debate controller has been shut down")]
    ShutDown,

    #[error("Debate aborted: the session was torn down while running")]
    Aborted,

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Domain error: {0}")]
    Domain(DomainError),
}

impl From<DomainError> for DebateError {
    fn from(e: DomainError) -> Self {
        if e.is_validation() {
            DebateError::Validation(e)
        } else {
            DebateError::Domain(e)
        }
    }
}

/// Settings that apply to every debate run by a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Language every participant is instructed to answer in
    pub response_language: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            response_language: DEFAULT_RESPONSE_LANGUAGE.to_string(),
        }
    }
}

impl ControllerOptions {
    pub fn with_response_language(mut self, language: impl Into<String>) -> Self {
        self.response_language = language.into();
        self
    }
}

struct ActiveDebate {
    session: DebateSession,
    participants: Arc<ParticipantSessions>,
    cancel: CancellationToken,
}

/// What `run()` needs without touching the slot
struct RunContext {
    session_id: String,
    topic: String,
    max_rounds: u32,
    members: Vec<Participant>,
    enable_web_search: bool,
    participants: Arc<ParticipantSessions>,
    cancel: CancellationToken,
}

/// Use case that runs one committee debate at a time
pub struct DebateController<G: ConversationGateway + 'static> {
    gateway: Arc<G>,
    options: ControllerOptions,
    bus: EventBus,
    active: Mutex<Option<ActiveDebate>>,
    shut_down: AtomicBool,
}

impl<G: ConversationGateway + 'static> DebateController<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_options(gateway, ControllerOptions::default())
    }

    pub fn with_options(gateway: Arc<G>, options: ControllerOptions) -> Self {
        Self {
            gateway,
            options,
            bus: EventBus::new(),
            active: Mutex::new(None),
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Register an observer for every event emitted from now on.
    pub fn subscribe(&self, observer: Arc<dyn DebateObserver>) {
        self.bus.subscribe(observer);
    }

    /// Copy of the active session, if any.
    pub fn snapshot(&self) -> Option<DebateSnapshot> {
        self.slot().as_ref().map(|active| active.session.snapshot())
    }

    pub fn is_active(&self) -> bool {
        self.slot().is_some()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    /// Start a new debate.
    ///
    /// The request is validated before anything else happens; an invalid
    /// request leaves any current session untouched. A valid request ends the
    /// current session (observers included), creates one conversation
    /// session per participant and emits `session_started`.
    pub async fn start(&self, request: StartDebateRequest) -> Result<DebateSnapshot, DebateError> {
        self.ensure_running()?;
        let config = DebateConfig::from_request(request)?;

        if self.is_active() {
            info!("Ending the current debate before starting a new one");
            self.end_session().await;
        }

        let session = DebateSession::new(config);
        let participants = ParticipantSessions::create_all(
            self.gateway.as_ref(),
            session.members(),
            session.config().enable_web_search,
            &self.options.response_language,
        )
        .await?;

        if self.is_shut_down() {
            participants.destroy_all().await;
            return Err(DebateError::ShutDown);
        }

        let snapshot = session.snapshot();
        info!(
            session_id = %snapshot.session_id,
            members = snapshot.members.len(),
            rounds = snapshot.max_rounds,
            "Debate session started"
        );

        let displaced = self.slot().replace(ActiveDebate {
            session,
            participants: Arc::new(participants),
            cancel: CancellationToken::new(),
        });
        if let Some(displaced) = displaced {
            // Another start() won the race for the slot while we were creating sessions
            Self::tear_down(displaced).await;
        }

        self.bus.emit(&DebateEvent::SessionStarted {
            session: Box::new(snapshot.clone()),
        });
        Ok(snapshot)
    }

    /// Run every round and closing phase of the active debate.
    ///
    /// Returns the final snapshot. Fails with [`DebateError::Aborted`] if the
    /// session is ended while this is in progress.
    pub async fn run(&self) -> Result<DebateSnapshot, DebateError> {
        self.ensure_running()?;
        let ctx = self.begin_run()?;
        self.bus.emit(&DebateEvent::StatusChanged {
            status: DebateStatus::Debating,
        });
        info!(session_id = %ctx.session_id, topic = %ctx.topic, "Debate running");

        let result = self.drive(&ctx).await;
        match &result {
            Ok(_) => info!(session_id = %ctx.session_id, "Debate completed"),
            Err(e) => warn!(session_id = %ctx.session_id, "Debate stopped: {}", e),
        }
        result
    }

    /// End the active debate: destroy its sessions (best-effort) and drop
    /// the session and every observer.
    pub async fn end_session(&self) {
        let previous = self.slot().take();
        self.bus.clear();
        if let Some(active) = previous {
            info!(session_id = active.session.id(), "Ending debate session");
            Self::tear_down(active).await;
        }
    }

    /// End the active debate and release the backend. Later calls are no-ops.
    pub async fn shutdown(&self) -> Result<(), DebateError> {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        info!("Shutting down debate controller");
        self.end_session().await;
        self.gateway.shutdown().await?;
        Ok(())
    }

    /// Alias of [`DebateController::shutdown`].
    pub async fn stop(&self) -> Result<(), DebateError> {
        self.shutdown().await
    }

    // ==================== Round execution ====================

    async fn drive(&self, ctx: &RunContext) -> Result<DebateSnapshot, DebateError> {
        let debaters = TurnScheduler::ordered_debaters(&ctx.members);

        for round in 1..=ctx.max_rounds {
            self.with_session(ctx, |s| s.begin_round(round))?;
            self.bus.emit(&DebateEvent::RoundStarted { round });
            debug!(round, speakers = debaters.len(), "Round started");

            for &participant in &debaters {
                let prompt = self.with_session(ctx, |s| {
                    DebatePromptTemplate::opening_or_continuation(
                        participant,
                        &ctx.topic,
                        round,
                        s.transcript().statements(),
                    )
                })?;
                self.take_turn(ctx, participant, round, &prompt).await?;
            }

            self.bus.emit(&DebateEvent::RoundEnded { round });
        }

        // Closing prompts see the rounds only, not earlier closing statements
        let rounds = self.with_session(ctx, |s| s.transcript().round_bound())?;
        let mut summary: Option<String> = None;

        for (phase, participant) in TurnScheduler::closing_phases(&ctx.members) {
            self.transition(ctx, phase.status())?;
            let prompt = match phase {
                ClosingPhase::Summary => DebatePromptTemplate::summary_prompt(&ctx.topic, &rounds),
                ClosingPhase::Verdict => {
                    DebatePromptTemplate::verdict_prompt(&ctx.topic, &rounds, summary.as_deref())
                }
            };

            let statement = self
                .take_turn(ctx, participant, CLOSING_ROUND, &prompt)
                .await?;
            match phase {
                ClosingPhase::Summary => {
                    self.with_session(ctx, |s| s.set_summary(statement.content.clone()))?;
                    summary = Some(statement.content);
                }
                ClosingPhase::Verdict => {
                    self.with_session(ctx, |s| s.set_verdict(statement.content))?;
                }
            }
        }

        self.transition(ctx, DebateStatus::Completed)?;
        let snapshot = self.with_session(ctx, |s| s.snapshot())?;
        self.bus.emit(&DebateEvent::SessionEnded {
            session: Box::new(snapshot.clone()),
        });
        Ok(snapshot)
    }

    /// One participant's turn: announce, stream, record.
    async fn take_turn(
        &self,
        ctx: &RunContext,
        participant: &Participant,
        round: u32,
        prompt: &str,
    ) -> Result<Statement, DebateError> {
        if ctx.cancel.is_cancelled() {
            return Err(DebateError::Aborted);
        }

        let pending = Statement::new(participant, round);
        debug!(
            participant = participant.name(),
            role = %participant.role(),
            round,
            "Turn started"
        );
        self.bus.emit(&DebateEvent::MemberSpeaking {
            member: participant.clone(),
            round,
        });

        let output = ctx
            .participants
            .converse(participant.id(), prompt, |delta| {
                self.bus.emit(&DebateEvent::delta(&pending, delta))
            })
            .await
            .map_err(|e| {
                if ctx.cancel.is_cancelled() {
                    DebateError::Aborted
                } else {
                    DebateError::Gateway(e)
                }
            })?;

        let mut statement = pending.finalize(output.text);
        if ctx.enable_web_search {
            statement = statement.with_web_search_used(output.web_search_used);
        }

        self.with_session(ctx, |s| s.record(statement.clone()))?;
        self.bus.emit(&DebateEvent::StatementComplete {
            statement: statement.clone(),
        });
        self.bus.emit(&DebateEvent::StatementAdded {
            statement: statement.clone(),
        });
        Ok(statement)
    }

    // ==================== Slot helpers ====================

    /// Claim the idle session for running and move it to `debating`.
    fn begin_run(&self) -> Result<RunContext, DebateError> {
        let mut slot = self.slot();
        let active = slot.as_mut().ok_or(DebateError::NoActiveSession)?;

        let status = active.session.status();
        if status != DebateStatus::Idle {
            return Err(DebateError::InvalidState {
                expected: DebateStatus::Idle,
                actual: status,
            });
        }
        active.session.transition_to(DebateStatus::Debating)?;

        let config = active.session.config();
        Ok(RunContext {
            session_id: active.session.id().to_string(),
            topic: config.topic.content().to_string(),
            max_rounds: config.max_rounds,
            members: config.members.clone(),
            enable_web_search: config.enable_web_search,
            participants: Arc::clone(&active.participants),
            cancel: active.cancel.clone(),
        })
    }

    fn transition(&self, ctx: &RunContext, next: DebateStatus) -> Result<(), DebateError> {
        self.with_session(ctx, |s| s.transition_to(next))??;
        debug!(status = %next, "Status changed");
        self.bus.emit(&DebateEvent::StatusChanged { status: next });
        Ok(())
    }

    /// Apply `f` to the session `ctx` was started for.
    ///
    /// Fails with [`DebateError::Aborted`] once that session has been torn
    /// down or replaced.
    fn with_session<R>(
        &self,
        ctx: &RunContext,
        f: impl FnOnce(&mut DebateSession) -> R,
    ) -> Result<R, DebateError> {
        if ctx.cancel.is_cancelled() {
            return Err(DebateError::Aborted);
        }
        let mut slot = self.slot();
        match slot.as_mut() {
            Some(active) if active.session.id() == ctx.session_id => Ok(f(&mut active.session)),
            _ => Err(DebateError::Aborted),
        }
    }

    fn ensure_running(&self) -> Result<(), DebateError> {
        if self.is_shut_down() {
            return Err(DebateError::ShutDown);
        }
        Ok(())
    }

    fn slot(&self) -> MutexGuard<'_, Option<ActiveDebate>> {
        self.active
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn tear_down(active: ActiveDebate) {
        active.cancel.cancel();
        active.participants.destroy_all().await;
    }
}
