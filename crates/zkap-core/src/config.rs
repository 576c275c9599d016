//! Workflow configuration.
//!
//! Everything the orchestrator needs is passed in explicitly at
//! construction: the public threshold, the verifier base URL, and an
//! optional fixed reference date for witness derivation. There is no
//! module-scope or ambient configuration anywhere in the stack.

use chrono::NaiveDate;

/// The default public threshold for the age predicate.
pub const DEFAULT_THRESHOLD: u64 = 18;

/// Configuration for one orchestrator instance.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Public threshold the predicate proves against. Appears as
    /// `publicSignals[0]` in every proof artifact.
    pub threshold: u64,
    /// Base URL of the remote verification service.
    pub verifier_base_url: String,
    /// Fixed reference date for witness derivation. `None` means "today",
    /// resolved once per run; tests inject a fixed date.
    pub reference_date: Option<NaiveDate>,
}

impl WorkflowConfig {
    /// Create a configuration with the default threshold.
    pub fn new(verifier_base_url: impl Into<String>) -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            verifier_base_url: verifier_base_url.into(),
            reference_date: None,
        }
    }

    /// Override the public threshold.
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Pin the reference date used for witness derivation.
    pub fn with_reference_date(mut self, reference: NaiveDate) -> Self {
        self.reference_date = Some(reference);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = WorkflowConfig::new("http://localhost:8000");
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);
        assert_eq!(config.verifier_base_url, "http://localhost:8000");
        assert!(config.reference_date.is_none());
    }

    #[test]
    fn builders_override() {
        let reference = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let config = WorkflowConfig::new("http://v.example")
            .with_threshold(21)
            .with_reference_date(reference);
        assert_eq!(config.threshold, 21);
        assert_eq!(config.reference_date, Some(reference));
    }
}
