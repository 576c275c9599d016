//! # zkap-core — Domain Types for the Age-Proof Workflow
//!
//! Shared vocabulary for the proof-workflow stack: the run lifecycle
//! ([`Phase`], [`Outcome`]), the private witness newtype and its derivation
//! ([`witness`]), the append-only audit trail ([`event`]), and the explicit
//! workflow configuration ([`config`]).
//!
//! ## Privacy boundary
//!
//! The central invariant of the whole stack lives here: [`PrivateWitness`]
//! cannot be serialized, cannot be cloned, redacts its `Debug` output, and
//! zeroes its memory on drop. Everything that must never see the witness
//! (the event log, the verification payload) is typed so that it simply has
//! no way to receive one.

pub mod config;
pub mod event;
pub mod phase;
pub mod witness;

pub use config::{WorkflowConfig, DEFAULT_THRESHOLD};
pub use event::{EventEntry, EventLog, Severity};
pub use phase::{Outcome, Phase};
pub use witness::{derive_witness, PrivateWitness, WitnessError};
