//! Groth16 proof artifact types.
//!
//! The wire shape follows the snarkjs JSON encoding: three proof points as
//! decimal-string field elements (`pi_a`, `pi_b`, `pi_c`) plus an ordered
//! sequence of decimal-string public signals whose first element is the
//! public threshold. Shape validation happens once, at the engine adapter
//! boundary, so downstream code never handles a structurally broken proof.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A Groth16 proof in snarkjs JSON shape.
///
/// `pi_a` and `pi_c` are G1 points (3 projective coordinates), `pi_b` is a
/// G2 point (3 coordinate pairs). All coordinates are decimal-encoded field
/// elements. None of them is derived from, or reveals, the private witness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Groth16Proof {
    pub pi_a: Vec<String>,
    pub pi_b: Vec<Vec<String>>,
    pub pi_c: Vec<String>,
    pub protocol: String,
    pub curve: String,
}

/// The complete public artifact of a successful proving call.
///
/// This is the only proof-related value the orchestrator stores, and the
/// only one the verification client ever sees. Once recorded for a run it
/// is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofArtifact {
    pub proof: Groth16Proof,
    pub public_signals: Vec<String>,
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl Groth16Proof {
    /// Structural validation of the proof points.
    fn validate(&self) -> Result<(), EngineError> {
        if self.protocol != "groth16" {
            return Err(EngineError::MalformedProof {
                reason: format!("unexpected protocol {:?}", self.protocol),
            });
        }
        if self.pi_a.len() != 3 {
            return Err(EngineError::MalformedProof {
                reason: format!("pi_a must have 3 coordinates, got {}", self.pi_a.len()),
            });
        }
        if self.pi_b.len() != 3 || self.pi_b.iter().any(|pair| pair.len() != 2) {
            return Err(EngineError::MalformedProof {
                reason: "pi_b must be 3 coordinate pairs".to_string(),
            });
        }
        if self.pi_c.len() != 3 {
            return Err(EngineError::MalformedProof {
                reason: format!("pi_c must have 3 coordinates, got {}", self.pi_c.len()),
            });
        }
        let all_coords = self
            .pi_a
            .iter()
            .chain(self.pi_b.iter().flatten())
            .chain(self.pi_c.iter());
        for coord in all_coords {
            if !is_decimal(coord) {
                return Err(EngineError::MalformedProof {
                    reason: "proof coordinates must be decimal field elements".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl ProofArtifact {
    /// Validate the artifact shape.
    ///
    /// Rejects structurally broken proofs at the adapter boundary rather
    /// than letting missing fields propagate into the verification payload.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.proof.validate()?;
        if self.public_signals.is_empty() {
            return Err(EngineError::MalformedProof {
                reason: "publicSignals must not be empty".to_string(),
            });
        }
        for signal in &self.public_signals {
            if !is_decimal(signal) {
                return Err(EngineError::MalformedProof {
                    reason: "public signals must be decimal field elements".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Check that `publicSignals[0]` equals the expected public threshold.
    pub fn ensure_threshold(&self, threshold: u64) -> Result<(), EngineError> {
        match self.public_signals.first() {
            Some(first) if *first == threshold.to_string() => Ok(()),
            Some(first) => Err(EngineError::MalformedProof {
                reason: format!("publicSignals[0] is {first}, expected {threshold}"),
            }),
            None => Err(EngineError::MalformedProof {
                reason: "publicSignals must not be empty".to_string(),
            }),
        }
    }
}
