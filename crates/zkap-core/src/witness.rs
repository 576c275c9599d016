//! Private witness derivation.
//!
//! The witness is the user's age in completed years, derived from a raw
//! birth-date string against an injected reference date. Derivation is pure:
//! no ambient clock, no side effects, so the boundary cases (birthday today,
//! birthday tomorrow) are directly testable.
//!
//! The derived value is wrapped in [`PrivateWitness`], which is deliberately
//! hostile to accidental disclosure: no `Serialize`, no `Clone`, a redacted
//! `Debug`, and zeroization on drop.

use chrono::{Datelike, NaiveDate};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors from witness derivation.
///
/// None of the variants echo the raw input back: these messages end up in
/// user-facing error state and must not carry the private value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WitnessError {
    /// No input was supplied.
    #[error("no birth date supplied")]
    MissingInput,
    /// The input did not parse as an ISO `YYYY-MM-DD` date.
    #[error("birth date is not a valid YYYY-MM-DD date")]
    Unparseable,
    /// The parsed date lies after the reference date.
    #[error("birth date lies in the future")]
    FutureDate,
}

/// The private witness: age in completed years.
///
/// Exists only for the duration of a proving call. The orchestrator derives
/// it, hands a reference to the proving engine, and drops it; it is never
/// stored in the workflow context, the event log, or any wire payload.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateWitness(u64);

impl PrivateWitness {
    /// Read the witness value for handing to the proving engine.
    ///
    /// This is the single sanctioned read path. Callers other than a
    /// proving-engine implementation have no business calling it.
    pub fn expose(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Debug for PrivateWitness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateWitness(<redacted>)")
    }
}

/// Derive the private witness from a raw birth-date string.
///
/// Calendar-correct completed years: the year difference, decremented by one
/// when the reference month/day falls before the birth month/day. On the
/// birthday itself the age is NOT decremented.
pub fn derive_witness(raw_input: &str, reference: NaiveDate) -> Result<PrivateWitness, WitnessError> {
    let trimmed = raw_input.trim();
    if trimmed.is_empty() {
        return Err(WitnessError::MissingInput);
    }

    let birth = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| WitnessError::Unparseable)?;

    if birth > reference {
        return Err(WitnessError::FutureDate);
    }

    let mut years = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    Ok(PrivateWitness(years as u64))
}
