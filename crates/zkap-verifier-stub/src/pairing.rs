//! The pairing-check boundary.
//!
//! The actual Groth16 pairing equation is owned by an external verifying
//! engine; this trait keeps that boundary explicit. The shipped
//! implementation recomputes the deterministic mock proof, which accepts
//! exactly the artifacts the mock proving engine emits and rejects any
//! tampered coordinate or signal.

use zkap_engine::Groth16Proof;

/// Verdict-producing check over a public proof artifact.
///
/// Implementations see only the proof and the public signals; there is no
/// secret input to a Groth16 verification.
pub trait PairingCheck: Send + Sync {
    fn check(&self, proof: &Groth16Proof, public_signals: &[String]) -> bool;
}

/// Pairing check matching the deterministic mock proving engine.
#[derive(Debug, Default)]
pub struct MockPairingCheck;

impl PairingCheck for MockPairingCheck {
    fn check(&self, proof: &Groth16Proof, public_signals: &[String]) -> bool {
        zkap_engine::mock::mock_proof(public_signals) == *proof
    }
}
