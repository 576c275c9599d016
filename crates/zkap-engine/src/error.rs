//! Proving-engine failure taxonomy.

/// Errors from a proving engine.
///
/// The variants are deliberately distinct because the orchestrator routes
/// them differently: `ConstraintUnsatisfied` is an expected protocol
/// outcome (the run terminates as "under threshold" with no verification
/// call), while every other variant aborts the run. Constraint violation is
/// never inferred from a generic failure; an engine reports it only when it
/// has explicit evidence that no satisfying assignment exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The engine itself failed to initialize or its handles (circuit
    /// program, proving key) could not be loaded. Infrastructure error.
    #[error("proving engine unavailable: {reason}")]
    Unavailable { reason: String },

    /// No satisfying assignment exists: the private witness fails the
    /// predicate being proved. Carries no payload so that nothing about
    /// the witness can leak through the error path.
    #[error("no satisfying witness for the predicate")]
    ConstraintUnsatisfied,

    /// The engine returned something that is not a structurally valid
    /// proof artifact.
    #[error("malformed proof artifact: {reason}")]
    MalformedProof { reason: String },

    /// Any other engine failure.
    #[error("proving failed: {reason}")]
    Other { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = EngineError::Unavailable {
            reason: "proving key missing".into(),
        };
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("proving key missing"));

        assert_eq!(
            EngineError::ConstraintUnsatisfied.to_string(),
            "no satisfying witness for the predicate"
        );
    }

    #[test]
    fn constraint_unsatisfied_carries_no_data() {
        // The variant is a unit: there is no field that could hold the
        // witness or anything derived from it.
        let err = EngineError::ConstraintUnsatisfied;
        assert_eq!(err.clone(), EngineError::ConstraintUnsatisfied);
    }
}
