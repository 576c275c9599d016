//! Counting mock verifier.
//!
//! Records every call and the exact payload it would have sent, so tests
//! can assert both "zero network calls were made" (the under-threshold
//! short-circuit) and "the payload contains only public data".

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use zkap_engine::Groth16Proof;

use crate::api::VerificationApi;
use crate::error::ClientError;
use crate::types::{VerifyRequest, VerifyResponse};

/// What the mock should answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockVerdict {
    /// Well-formed response, `verified: true`.
    Accept,
    /// Well-formed response, `verified: false`. A legitimate outcome, not
    /// an error.
    Reject,
    /// Simulated transport failure.
    TransportFailure,
}

/// Mock implementation of [`VerificationApi`].
pub struct MockVerifier {
    verdict: MockVerdict,
    calls: AtomicU64,
    payloads: Mutex<Vec<serde_json::Value>>,
}

impl MockVerifier {
    pub fn new(verdict: MockVerdict) -> Self {
        Self {
            verdict,
            calls: AtomicU64::new(0),
            payloads: Mutex::new(Vec::new()),
        }
    }

    /// Number of verification calls observed.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the serialized payloads, in call order.
    pub fn payloads(&self) -> Vec<serde_json::Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl VerificationApi for MockVerifier {
    async fn verify(
        &self,
        proof: &Groth16Proof,
        public_signals: &[String],
    ) -> Result<VerifyResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        // Capture exactly what the real client would serialize.
        let payload = serde_json::to_value(VerifyRequest {
            proof,
            public_signals,
        })
        .unwrap_or_default();
        self.payloads.lock().unwrap().push(payload);

        match self.verdict {
            MockVerdict::Accept => Ok(VerifyResponse::with_verdict(true)),
            MockVerdict::Reject => Ok(VerifyResponse::with_verdict(false)),
            MockVerdict::TransportFailure => Err(ClientError::UnexpectedStatus {
                endpoint: "mock:/verify".into(),
                status: 502,
                body: "injected transport failure".into(),
            }),
        }
    }
}

impl std::fmt::Debug for MockVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockVerifier")
            .field("verdict", &self.verdict)
            .field("calls", &self.calls.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkap_engine::mock::mock_proof;

    fn artifact() -> (Groth16Proof, Vec<String>) {
        let signals = vec!["18".to_string()];
        (mock_proof(&signals), signals)
    }

    #[tokio::test]
    async fn accept_and_reject_are_well_formed_responses() {
        let (proof, signals) = artifact();

        let accepting = MockVerifier::new(MockVerdict::Accept);
        assert!(accepting.verify(&proof, &signals).await.unwrap().verified);

        let rejecting = MockVerifier::new(MockVerdict::Reject);
        assert!(!rejecting.verify(&proof, &signals).await.unwrap().verified);
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        let (proof, signals) = artifact();
        let failing = MockVerifier::new(MockVerdict::TransportFailure);
        assert!(failing.verify(&proof, &signals).await.is_err());
    }

    #[tokio::test]
    async fn counts_calls_and_captures_payloads() {
        let (proof, signals) = artifact();
        let verifier = MockVerifier::new(MockVerdict::Accept);
        assert_eq!(verifier.calls(), 0);

        verifier.verify(&proof, &signals).await.unwrap();
        verifier.verify(&proof, &signals).await.unwrap();

        assert_eq!(verifier.calls(), 2);
        let payloads = verifier.payloads();
        assert_eq!(payloads.len(), 2);

        let mut keys: Vec<&str> = payloads[0]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["proof", "publicSignals"]);
    }
}
