//! Deterministic mock proving engine.
//!
//! Produces SHA-256-derived "proof points" over the public signals so that a
//! matching mock pairing check can recompute and accept them. **No
//! zero-knowledge guarantees** and no real cryptography; the point is that
//! the proof bytes are a pure function of the PUBLIC inputs, so the mock
//! reproduces the privacy shape of the real engine: nothing in the artifact
//! depends on the witness.
//!
//! Failure injection covers every branch of the engine taxonomy, which is
//! what the orchestrator tests actually need from a mock.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use zkap_core::PrivateWitness;

use crate::artifact::{Groth16Proof, ProofArtifact};
use crate::error::EngineError;
use crate::traits::ProvingEngine;

/// Domain separator for mock proof derivation.
const MOCK_DOMAIN: &[u8] = b"zkap-mock-groth16-v1";

/// Derive one decimal field element from the seed material.
fn field_element(signals: &[String], counter: u8) -> String {
    let mut hasher = Sha256::new();
    hasher.update(MOCK_DOMAIN);
    hasher.update([counter]);
    for signal in signals {
        hasher.update(signal.as_bytes());
        hasher.update([0x1f]);
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    u128::from_be_bytes(bytes).to_string()
}

/// Recompute the deterministic mock proof for a set of public signals.
///
/// Shared with the stub verifier's pairing check: a proof is "valid" exactly
/// when it equals this recomputation, so tampering with any coordinate or
/// signal flips the verdict.
pub fn mock_proof(public_signals: &[String]) -> Groth16Proof {
    let e = |counter| field_element(public_signals, counter);
    Groth16Proof {
        pi_a: vec![e(0), e(1), "1".to_string()],
        pi_b: vec![
            vec![e(2), e(3)],
            vec![e(4), e(5)],
            vec!["1".to_string(), "0".to_string()],
        ],
        pi_c: vec![e(6), e(7), "1".to_string()],
        protocol: "groth16".to_string(),
        curve: "bn128".to_string(),
    }
}

/// Deterministic mock proving engine with failure injection.
#[derive(Default)]
pub struct MockEngine {
    fail_load: Option<String>,
    fail_prove: Option<EngineError>,
    loaded: AtomicBool,
    load_calls: AtomicU64,
    prove_calls: AtomicU64,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `ensure_loaded` fail with `Unavailable { reason }`.
    pub fn with_load_failure(mut self, reason: impl Into<String>) -> Self {
        self.fail_load = Some(reason.into());
        self
    }

    /// Make every `prove` call fail with the given error.
    pub fn with_prove_failure(mut self, error: EngineError) -> Self {
        self.fail_prove = Some(error);
        self
    }

    /// Number of `ensure_loaded` invocations observed.
    pub fn load_calls(&self) -> u64 {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Number of `prove` invocations observed.
    pub fn prove_calls(&self) -> u64 {
        self.prove_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProvingEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    async fn ensure_loaded(&self) -> Result<(), EngineError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.fail_load {
            return Err(EngineError::Unavailable {
                reason: reason.clone(),
            });
        }
        self.loaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn prove(
        &self,
        witness: &PrivateWitness,
        threshold: u64,
    ) -> Result<ProofArtifact, EngineError> {
        self.prove_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.fail_prove {
            return Err(error.clone());
        }
        if !self.loaded.load(Ordering::SeqCst) {
            return Err(EngineError::Unavailable {
                reason: "engine handles not loaded".to_string(),
            });
        }

        // The mock has direct knowledge of the predicate, so the
        // constraint-violation outcome is explicit, not inferred.
        if witness.expose() < threshold {
            return Err(EngineError::ConstraintUnsatisfied);
        }

        let public_signals = vec![threshold.to_string()];
        let artifact = ProofArtifact {
            proof: mock_proof(&public_signals),
            public_signals,
        };
        artifact.validate()?;
        Ok(artifact)
    }
}

impl std::fmt::Debug for MockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockEngine")
            .field("fail_load", &self.fail_load)
            .field("fail_prove", &self.fail_prove)
            .field("load_calls", &self.load_calls.load(Ordering::SeqCst))
            .field("prove_calls", &self.prove_calls.load(Ordering::SeqCst))
            .finish()
    }
}
