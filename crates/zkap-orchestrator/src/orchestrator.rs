//! The proof-workflow state machine.
//!
//! One orchestrator instance owns the authoritative workflow state and
//! drives the phase sequence `Idle → LoadingEngine → Proving → Verifying →
//! Result(..)` as a single sequential async flow with three suspension
//! points: engine-handle loading, the proving call, and the verification
//! call.
//!
//! ## Guarantees
//!
//! - At most one run is active; `start()` during an active run is a logged
//!   no-op rejection, never queued.
//! - The private witness exists only as a local inside [`Orchestrator::start`]
//!   and is dropped the moment the proving call returns.
//! - Every event-log milestone is appended before the corresponding phase
//!   transition becomes visible on the watch channel.
//! - `reset()` rotates the run id; a run that was in flight discards its
//!   results when they eventually resolve instead of touching the new
//!   context.
//! - The event log is observability only; no control decision reads it.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use uuid::Uuid;

use zkap_client::VerificationApi;
use zkap_core::{derive_witness, EventEntry, EventLog, Outcome, Phase, Severity, WorkflowConfig};
use zkap_engine::{prove_timed, EngineError, ProvingEngine};

use crate::context::{ContextSnapshot, WorkflowContext};
use crate::error::WorkflowError;

/// What subscribers observe on every phase transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSnapshot {
    pub run_id: Uuid,
    pub phase: Phase,
}

/// The proof-workflow orchestrator.
///
/// Composes the witness computer, the proving engine, and the verification
/// client into the end-to-end phase sequence. Presentation layers hold an
/// `Arc<Orchestrator>`, call [`start`](Self::start)/[`reset`](Self::reset),
/// and observe progress via [`subscribe`](Self::subscribe) and
/// [`events`](Self::events); they own no workflow state themselves.
pub struct Orchestrator {
    config: WorkflowConfig,
    engine: Arc<dyn ProvingEngine>,
    verifier: Arc<dyn VerificationApi>,
    log: EventLog,
    state: Mutex<WorkflowContext>,
    phase_tx: watch::Sender<PhaseSnapshot>,
}

impl Orchestrator {
    pub fn new(
        config: WorkflowConfig,
        engine: Arc<dyn ProvingEngine>,
        verifier: Arc<dyn VerificationApi>,
    ) -> Self {
        let run_id = Uuid::new_v4();
        let (phase_tx, _) = watch::channel(PhaseSnapshot {
            run_id,
            phase: Phase::Idle,
        });
        Self {
            state: Mutex::new(WorkflowContext::idle(run_id, config.threshold)),
            config,
            engine,
            verifier,
            log: EventLog::new(),
            phase_tx,
        }
    }

    /// Execute one proof workflow for the given raw birth-date input.
    ///
    /// Runs the full sequence and returns the terminal [`Outcome`], or the
    /// [`WorkflowError`] that aborted the run back to `Idle`. Rejected with
    /// [`WorkflowError::AlreadyRunning`] while another run is active.
    pub async fn start(&self, raw_input: &str) -> Result<Outcome, WorkflowError> {
        let run_id = {
            let mut ctx = self.state.lock();
            if ctx.in_flight || ctx.phase.is_active() {
                tracing::warn!("start() rejected: a run is already active");
                self.log.error("start rejected: a proof workflow is already running");
                return Err(WorkflowError::AlreadyRunning);
            }
            let run_id = Uuid::new_v4();
            *ctx = WorkflowContext::fresh(run_id, self.config.threshold);
            run_id
        };
        self.log.clear();
        tracing::info!(%run_id, "proof workflow started");

        let reference = self
            .config
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive());

        // Witness derivation is the fail-fast step: on bad input the phase
        // never leaves Idle. From here until the proving call returns, the
        // witness lives in this stack frame and nowhere else.
        let witness = match derive_witness(raw_input, reference) {
            Ok(witness) => witness,
            Err(e) => return Err(self.abort(run_id, WorkflowError::InvalidInput(e))),
        };

        self.log_if_current(
            run_id,
            Severity::Info,
            format!(
                "initializing groth16 prover (public threshold = {})",
                self.config.threshold
            ),
        );
        self.log_if_current(
            run_id,
            Severity::Info,
            "loading circuit program and proving key".to_string(),
        );
        self.advance(run_id, Phase::LoadingEngine)?;

        if let Err(e) = self.engine.ensure_loaded().await {
            return Err(self.abort(
                run_id,
                WorkflowError::EngineUnavailable {
                    reason: e.to_string(),
                },
            ));
        }
        self.log_if_current(
            run_id,
            Severity::Info,
            format!("engine handles loaded ({})", self.engine.name()),
        );

        self.log_if_current(
            run_id,
            Severity::Info,
            "computing r1cs witness and running groth16 prover".to_string(),
        );
        self.advance(run_id, Phase::Proving)?;

        let (proved, elapsed) =
            prove_timed(self.engine.as_ref(), &witness, self.config.threshold).await;
        drop(witness);
        // Elapsed proving time is reported whatever the outcome was.
        self.log_if_current(
            run_id,
            Severity::Trace,
            format!("proving call finished in {}ms", elapsed.as_millis()),
        );

        let artifact = match proved {
            Ok(artifact) => artifact,
            Err(EngineError::ConstraintUnsatisfied) => {
                // Expected cryptographic non-result: the predicate does not
                // hold for this witness. Not an error banner, and the
                // verifier is never contacted.
                self.log_if_current(
                    run_id,
                    Severity::Error,
                    "no valid witness exists for the requested predicate".to_string(),
                );
                self.log_if_current(
                    run_id,
                    Severity::Error,
                    "proof generation failed: circuit constraint violated".to_string(),
                );
                self.advance(run_id, Phase::Result(Outcome::UnderThreshold))?;
                tracing::info!(%run_id, "run finished under threshold");
                return Ok(Outcome::UnderThreshold);
            }
            Err(EngineError::Unavailable { reason }) => {
                return Err(self.abort(run_id, WorkflowError::EngineUnavailable { reason }))
            }
            Err(EngineError::MalformedProof { reason }) => {
                return Err(self.abort(run_id, WorkflowError::MalformedProof { reason }))
            }
            Err(EngineError::Other { reason }) => {
                return Err(self.abort(run_id, WorkflowError::Proof { reason }))
            }
        };

        // Re-validate at the orchestrator boundary: a proof that does not
        // carry the expected public threshold must not reach the wire.
        if let Err(e) = artifact
            .validate()
            .and_then(|_| artifact.ensure_threshold(self.config.threshold))
        {
            return Err(self.abort(
                run_id,
                WorkflowError::MalformedProof {
                    reason: e.to_string(),
                },
            ));
        }

        {
            let mut ctx = self.state.lock();
            if ctx.run_id != run_id {
                return Err(WorkflowError::Superseded);
            }
            ctx.record_artifact(artifact.clone());
        }
        self.log_if_current(
            run_id,
            Severity::Success,
            format!("proof generated in {}ms", elapsed.as_millis()),
        );
        self.log_if_current(
            run_id,
            Severity::Info,
            format!("public signal: threshold = {}", artifact.public_signals[0]),
        );
        self.log_if_current(
            run_id,
            Severity::Trace,
            "private witness stays local: not part of the proof payload".to_string(),
        );

        self.log_if_current(
            run_id,
            Severity::Info,
            "sending proof and public signals to verifier".to_string(),
        );
        self.advance(run_id, Phase::Verifying)?;

        let response = match self
            .verifier
            .verify(&artifact.proof, &artifact.public_signals)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return Err(self.abort(
                    run_id,
                    WorkflowError::Transport {
                        reason: e.to_string(),
                    },
                ))
            }
        };

        let outcome = if response.verified {
            self.log_if_current(
                run_id,
                Severity::Success,
                "pairing check passed: proof is valid".to_string(),
            );
            Outcome::Verified
        } else {
            self.log_if_current(
                run_id,
                Severity::Error,
                "pairing check failed: proof is invalid".to_string(),
            );
            Outcome::Invalid
        };
        self.advance(run_id, Phase::Result(outcome))?;
        tracing::info!(%run_id, %outcome, "run finished");
        Ok(outcome)
    }

    /// Unconditionally return to `Idle` with an empty context and an empty
    /// log. A run in flight is not cancelled; its results are discarded on
    /// arrival because the run id no longer matches.
    pub fn reset(&self) {
        let run_id = Uuid::new_v4();
        {
            let mut ctx = self.state.lock();
            *ctx = WorkflowContext::idle(run_id, self.config.threshold);
        }
        self.log.clear();
        self.phase_tx.send_replace(PhaseSnapshot {
            run_id,
            phase: Phase::Idle,
        });
        tracing::info!(%run_id, "workflow reset to idle");
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    /// Public snapshot of the current context.
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot::from(&*self.state.lock())
    }

    /// Snapshot of the event log in insertion order.
    pub fn events(&self) -> Vec<EventEntry> {
        self.log.entries()
    }

    /// Subscribe to phase transitions.
    pub fn subscribe(&self) -> watch::Receiver<PhaseSnapshot> {
        self.phase_tx.subscribe()
    }

    /// Append a milestone, but only while `run_id` is still the current
    /// run. Keeps a superseded run from writing into the log of its
    /// successor.
    fn log_if_current(&self, run_id: Uuid, severity: Severity, message: String) {
        if self.state.lock().run_id == run_id {
            self.log.append(severity, message);
        }
    }

    /// Make a phase transition visible, unless the run has been superseded.
    ///
    /// The corresponding log milestone must already have been appended:
    /// the watch publication here is what makes the transition externally
    /// observable.
    fn advance(&self, run_id: Uuid, phase: Phase) -> Result<(), WorkflowError> {
        {
            let mut ctx = self.state.lock();
            if ctx.run_id != run_id {
                tracing::debug!(%run_id, "discarding stale transition after reset");
                return Err(WorkflowError::Superseded);
            }
            ctx.phase = phase;
            if let Phase::Result(outcome) = phase {
                ctx.outcome = Some(outcome);
                ctx.in_flight = false;
            }
        }
        self.phase_tx.send_replace(PhaseSnapshot { run_id, phase });
        Ok(())
    }

    /// Abort the run to `Idle`, recording the error. Returns the error (or
    /// `Superseded` when a reset won the race).
    fn abort(&self, run_id: Uuid, error: WorkflowError) -> WorkflowError {
        {
            let mut ctx = self.state.lock();
            if ctx.run_id != run_id {
                tracing::debug!(%run_id, "discarding stale abort after reset");
                return WorkflowError::Superseded;
            }
            ctx.phase = Phase::Idle;
            ctx.in_flight = false;
            ctx.error_state = Some(error.clone());
        }
        self.log.error(format!("workflow aborted: {error}"));
        tracing::warn!(%run_id, %error, "workflow aborted to idle");
        self.phase_tx.send_replace(PhaseSnapshot {
            run_id,
            phase: Phase::Idle,
        });
        error
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("engine", &self.engine.name())
            .field("phase", &self.phase())
            .finish()
    }
}
