//! Per-run workflow context.
//!
//! One context exists per run, owned exclusively by the orchestrator behind
//! its state lock. It holds only public data: the witness is a local
//! variable inside the run function and is never stored here.

use serde::Serialize;
use uuid::Uuid;
use zkap_core::{Outcome, Phase};
use zkap_engine::ProofArtifact;

use crate::error::WorkflowError;

/// Orchestrator-private run state.
#[derive(Debug)]
pub(crate) struct WorkflowContext {
    /// Tag for this run. Results arriving with a different tag are stale
    /// and must be discarded.
    pub run_id: Uuid,
    pub phase: Phase,
    /// Single in-flight guard: covers the window between context creation
    /// and the first phase transition, where the phase alone would still
    /// read as `Idle`.
    pub in_flight: bool,
    pub threshold: u64,
    pub proof_artifact: Option<ProofArtifact>,
    pub outcome: Option<Outcome>,
    pub error_state: Option<WorkflowError>,
}

impl WorkflowContext {
    /// An empty idle context (initial state, and the result of `reset()`).
    pub fn idle(run_id: Uuid, threshold: u64) -> Self {
        Self {
            run_id,
            phase: Phase::Idle,
            in_flight: false,
            threshold,
            proof_artifact: None,
            outcome: None,
            error_state: None,
        }
    }

    /// A fresh context for a run that is about to execute.
    pub fn fresh(run_id: Uuid, threshold: u64) -> Self {
        Self {
            in_flight: true,
            ..Self::idle(run_id, threshold)
        }
    }

    /// Record the proof artifact. Once set it is immutable for the rest of
    /// the run; a second call is ignored.
    pub fn record_artifact(&mut self, artifact: ProofArtifact) {
        if self.proof_artifact.is_none() {
            self.proof_artifact = Some(artifact);
        }
    }
}

/// Public, serializable view of the context. Contains exclusively public
/// data; there is no field that could hold the witness or the raw input.
#[derive(Debug, Clone, Serialize)]
pub struct ContextSnapshot {
    pub run_id: Uuid,
    pub phase: Phase,
    pub threshold: u64,
    pub proof_artifact: Option<ProofArtifact>,
    pub outcome: Option<Outcome>,
    /// Human-readable message of the last surfaced error, if any.
    pub error: Option<String>,
}

impl From<&WorkflowContext> for ContextSnapshot {
    fn from(ctx: &WorkflowContext) -> Self {
        Self {
            run_id: ctx.run_id,
            phase: ctx.phase,
            threshold: ctx.threshold,
            proof_artifact: ctx.proof_artifact.clone(),
            outcome: ctx.outcome,
            error: ctx.error_state.as_ref().map(|e| e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkap_engine::mock::mock_proof;

    fn artifact() -> ProofArtifact {
        let public_signals = vec!["18".to_string()];
        ProofArtifact {
            proof: mock_proof(&public_signals),
            public_signals,
        }
    }

    #[test]
    fn idle_context_is_empty() {
        let ctx = WorkflowContext::idle(Uuid::new_v4(), 18);
        assert_eq!(ctx.phase, Phase::Idle);
        assert!(!ctx.in_flight);
        assert!(ctx.proof_artifact.is_none());
        assert!(ctx.outcome.is_none());
        assert!(ctx.error_state.is_none());
    }

    #[test]
    fn fresh_context_is_guarded() {
        let ctx = WorkflowContext::fresh(Uuid::new_v4(), 18);
        assert!(ctx.in_flight);
        assert_eq!(ctx.phase, Phase::Idle);
    }

    #[test]
    fn artifact_is_set_once() {
        let mut ctx = WorkflowContext::fresh(Uuid::new_v4(), 18);
        let first = artifact();
        ctx.record_artifact(first.clone());

        let mut second = artifact();
        second.public_signals = vec!["21".to_string()];
        ctx.record_artifact(second);

        assert_eq!(ctx.proof_artifact.unwrap(), first);
    }

    #[test]
    fn snapshot_carries_error_message_only() {
        let mut ctx = WorkflowContext::idle(Uuid::new_v4(), 18);
        ctx.error_state = Some(WorkflowError::Transport {
            reason: "connection refused".into(),
        });
        let snapshot = ContextSnapshot::from(&ctx);
        assert!(snapshot.error.unwrap().contains("connection refused"));
    }
}
