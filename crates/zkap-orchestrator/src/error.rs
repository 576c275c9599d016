//! Workflow error taxonomy.
//!
//! Everything here is an *abort*: the run returns to `Idle` with the error
//! recorded in the context's error state, and the user re-invokes `start()`
//! manually. The two legitimate non-success outcomes of the protocol,
//! "under threshold" and "proof invalid", are NOT errors; they live in
//! [`zkap_core::Outcome`].

use zkap_core::WitnessError;

/// Surfaced workflow failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// The raw input could not be turned into a witness. Local failure,
    /// the phase never leaves `Idle`.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] WitnessError),

    /// `start()` was invoked while a run is active. Logged no-op; the
    /// active run is unaffected.
    #[error("a proof workflow is already running")]
    AlreadyRunning,

    /// The proving engine or its handles failed to load. Infrastructure
    /// failure, aborts to `Idle`.
    #[error("proving engine unavailable: {reason}")]
    EngineUnavailable { reason: String },

    /// The engine failed for a reason other than an unsatisfiable
    /// constraint. Aborts to `Idle`.
    #[error("proof generation failed: {reason}")]
    Proof { reason: String },

    /// The engine produced a structurally invalid artifact. Aborts to
    /// `Idle`.
    #[error("malformed proof artifact: {reason}")]
    MalformedProof { reason: String },

    /// The verification request could not be completed (send failure,
    /// unexpected status, unparseable response). Aborts to `Idle`.
    #[error("verification request failed: {reason}")]
    Transport { reason: String },

    /// The run was discarded by a `reset()` that happened while it was in
    /// flight. Returned to the superseded caller only; never recorded in
    /// the (new) context's error state.
    #[error("run superseded by reset")]
    Superseded,
}
