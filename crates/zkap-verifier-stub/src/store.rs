//! Shared state for the stub verification service.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::pairing::{MockPairingCheck, PairingCheck};

/// Metadata about the loaded verification key.
#[derive(Debug, Clone)]
pub struct VkDescriptor {
    pub protocol: String,
    pub curve: String,
    pub n_public: u64,
}

impl Default for VkDescriptor {
    fn default() -> Self {
        Self {
            protocol: "groth16".to_string(),
            curve: "bn128".to_string(),
            n_public: 1,
        }
    }
}

struct StateInner {
    vk: Option<VkDescriptor>,
    threshold: u64,
    pairing: Box<dyn PairingCheck>,
    verify_hits: AtomicU64,
}

/// Cloneable handle to the service state.
///
/// Tests keep a clone and read the verify-hit counter directly; the
/// workflow's "no verification request was made" property is asserted
/// against it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

impl AppState {
    /// State with a loaded verification key and the mock pairing check.
    pub fn new(threshold: u64) -> Self {
        Self {
            inner: Arc::new(StateInner {
                vk: Some(VkDescriptor::default()),
                threshold,
                pairing: Box::new(MockPairingCheck),
                verify_hits: AtomicU64::new(0),
            }),
        }
    }

    /// State whose verification key failed to load: every proof-dependent
    /// endpoint answers 503.
    pub fn without_vk(threshold: u64) -> Self {
        Self {
            inner: Arc::new(StateInner {
                vk: None,
                threshold,
                pairing: Box::new(MockPairingCheck),
                verify_hits: AtomicU64::new(0),
            }),
        }
    }

    /// Swap in a different pairing check.
    pub fn with_pairing(threshold: u64, pairing: Box<dyn PairingCheck>) -> Self {
        Self {
            inner: Arc::new(StateInner {
                vk: Some(VkDescriptor::default()),
                threshold,
                pairing,
                verify_hits: AtomicU64::new(0),
            }),
        }
    }

    pub fn vk(&self) -> Option<&VkDescriptor> {
        self.inner.vk.as_ref()
    }

    pub fn threshold(&self) -> u64 {
        self.inner.threshold
    }

    pub fn pairing(&self) -> &dyn PairingCheck {
        self.inner.pairing.as_ref()
    }

    /// Count one `/verify` request.
    pub fn record_verify_hit(&self) {
        self.inner.verify_hits.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of `/verify` requests received so far.
    pub fn verify_hits(&self) -> u64 {
        self.inner.verify_hits.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("vk_loaded", &self.inner.vk.is_some())
            .field("threshold", &self.inner.threshold)
            .field("verify_hits", &self.verify_hits())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_counter_increments() {
        let state = AppState::new(18);
        assert_eq!(state.verify_hits(), 0);
        state.record_verify_hit();
        state.record_verify_hit();
        assert_eq!(state.verify_hits(), 2);
    }

    #[test]
    fn clones_share_the_counter() {
        let state = AppState::new(18);
        let clone = state.clone();
        clone.record_verify_hit();
        assert_eq!(state.verify_hits(), 1);
    }

    #[test]
    fn without_vk_has_none() {
        assert!(AppState::without_vk(18).vk().is_none());
        assert!(AppState::new(18).vk().is_some());
    }
}
