//! # zkap-engine — Proving-Engine Contract
//!
//! Wraps the external Groth16 proving engine behind an object-safe async
//! trait. The orchestrator drives `ensure_loaded` (handle loading, once per
//! process) and `prove` (witness in, public artifact out) without knowing
//! which engine implementation it holds.
//!
//! The failure taxonomy is the load-bearing part: `ConstraintUnsatisfied`
//! (no satisfying assignment exists, an expected protocol outcome) must
//! never be conflated with `Unavailable` (infrastructure) or `Other`
//! (anything else). See [`error::EngineError`].

pub mod artifact;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod snarkjs;
pub mod traits;

pub use artifact::{Groth16Proof, ProofArtifact};
pub use error::EngineError;
#[cfg(feature = "mock")]
pub use mock::MockEngine;
pub use snarkjs::{SnarkjsConfig, SnarkjsEngine};
pub use traits::{prove_timed, ProvingEngine};
