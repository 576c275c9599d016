//! The verification contract the orchestrator drives.

use async_trait::async_trait;
use zkap_engine::Groth16Proof;

use crate::error::ClientError;
use crate::types::VerifyResponse;

/// Contract for submitting a public proof artifact for verification.
///
/// Object-safe and `Send + Sync`: the orchestrator holds an
/// `Arc<dyn VerificationApi>` so tests can substitute a counting mock. The
/// signature is the privacy boundary: it accepts the proof and the public
/// signals and nothing else, so no implementation can ever observe the
/// witness or the raw input.
#[async_trait]
pub trait VerificationApi: Send + Sync {
    async fn verify(
        &self,
        proof: &Groth16Proof,
        public_signals: &[String],
    ) -> Result<VerifyResponse, ClientError>;
}
