//! The proving-engine contract.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use zkap_core::PrivateWitness;

use crate::artifact::ProofArtifact;
use crate::error::EngineError;

/// Contract for a Groth16 proving engine.
///
/// Implementations must be `Send + Sync` so they can be shared behind an
/// `Arc` across async tasks. The trait is object-safe: the orchestrator
/// holds an `Arc<dyn ProvingEngine>` and never knows which engine it drives.
#[async_trait]
pub trait ProvingEngine: Send + Sync {
    /// Engine name for logs (e.g. "mock", "snarkjs").
    fn name(&self) -> &str;

    /// Ensure the engine handles (circuit program, proving key) are loaded.
    ///
    /// Loading happens at most once per process; subsequent calls are
    /// cheap no-ops. A load failure is NOT retried here; the caller decides
    /// whether to surface it (it always does, as an infrastructure error).
    async fn ensure_loaded(&self) -> Result<(), EngineError>;

    /// Produce a proof that `witness >= threshold` without revealing the
    /// witness.
    ///
    /// The witness is received by reference and must not be copied into the
    /// returned artifact, any error, or any log output. On success the
    /// artifact has already passed shape validation.
    async fn prove(
        &self,
        witness: &PrivateWitness,
        threshold: u64,
    ) -> Result<ProofArtifact, EngineError>;
}

/// Run a proving call and report its wall-clock duration regardless of
/// outcome. The duration feeds the event log; it is observability data,
/// never control-flow input.
pub async fn prove_timed(
    engine: &dyn ProvingEngine,
    witness: &PrivateWitness,
    threshold: u64,
) -> (Result<ProofArtifact, EngineError>, Duration) {
    let started = Instant::now();
    let result = engine.prove(witness, threshold).await;
    (result, started.elapsed())
}
