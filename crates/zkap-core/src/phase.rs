//! Run lifecycle phases.
//!
//! A workflow run moves through `Idle → LoadingEngine → Proving → Verifying
//! → Result(..)`. The phase is monotonically non-decreasing within one run,
//! with two sanctioned exceptions: the `Proving → Result(UnderThreshold)`
//! short-circuit (no verification round trip is made for an unsatisfiable
//! witness) and the error-abort path back to `Idle`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terminal outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The verifier's pairing check passed: the predicate holds.
    Verified,
    /// The verifier received the proof but the pairing check failed.
    Invalid,
    /// The engine could not find a satisfying assignment: the private value
    /// fails the predicate. No verification request was made.
    UnderThreshold,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => write!(f, "verified"),
            Self::Invalid => write!(f, "invalid"),
            Self::UnderThreshold => write!(f, "under_threshold"),
        }
    }
}

/// Phase of the proof workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No run in progress. Initial state, and the target of every
    /// error abort.
    Idle,
    /// Engine handles (circuit program, proving key) are being loaded.
    LoadingEngine,
    /// The proving engine is computing a proof.
    Proving,
    /// The public artifact is being checked by the remote verifier.
    Verifying,
    /// The run completed with a terminal outcome. Remains until `reset()`
    /// or the next `start()`.
    Result(Outcome),
}

impl Phase {
    /// A run is in flight: `start()` must be rejected.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::LoadingEngine | Self::Proving | Self::Verifying)
    }

    /// The run has reached a terminal outcome.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    /// Position in the forward ordering. `Result` outcomes share a rank:
    /// they are all equally final.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::LoadingEngine => 1,
            Self::Proving => 2,
            Self::Verifying => 3,
            Self::Result(_) => 4,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::LoadingEngine => write!(f, "loading_engine"),
            Self::Proving => write!(f, "proving"),
            Self::Verifying => write!(f, "verifying"),
            Self::Result(outcome) => write!(f, "result({outcome})"),
        }
    }
}
