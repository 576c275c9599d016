//! # zkap-orchestrator — Proof-Workflow State Machine
//!
//! The finite-state controller that sequences witness derivation,
//! delegation to the proving engine, transmission of the public artifact to
//! the remote verifier, and interpretation of both engines' outcomes, while
//! guaranteeing the private value never leaves the orchestrating process.
//!
//! The failure taxonomy is deliberate: "expected cryptographic failure"
//! (no satisfying witness → `Result(UnderThreshold)`; pairing check failed
//! → `Result(Invalid)`) is kept apart from infrastructure failure (engine
//! unavailable, transport error → abort to `Idle` with a recorded error and
//! no automatic retry).

pub mod context;
pub mod error;
pub mod orchestrator;

pub use context::ContextSnapshot;
pub use error::WorkflowError;
pub use orchestrator::{Orchestrator, PhaseSnapshot};
