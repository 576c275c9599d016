//! HTTP client for the remote verification service.
//!
//! Wraps a `reqwest::Client` with the service base URL and a per-request
//! timeout. HTTP failures map to [`ClientError`] with the endpoint in the
//! diagnostic context. There is NO retry policy here: a failed verification
//! request aborts the run and the user re-invokes the workflow manually.

use std::time::Duration;

use async_trait::async_trait;
use zkap_engine::Groth16Proof;

use crate::api::VerificationApi;
use crate::error::ClientError;
use crate::types::{VerifyRequest, VerifyResponse, VkInfo};

/// Configuration for the verification client.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Base URL of the verification service (e.g. `http://localhost:8000`).
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl VerifierConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// HTTP client for the proof-verification service.
#[derive(Debug)]
pub struct VerifierClient {
    http: reqwest::Client,
    base_url: String,
}

impl VerifierClient {
    /// Build a client from configuration.
    pub fn new(config: VerifierConfig) -> Result<Self, ClientError> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config {
                reason: "verifier base URL must not be empty".into(),
            });
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Fetch display metadata about the loaded verification key.
    ///
    /// Purely informational: callers are expected to tolerate failure and
    /// the workflow itself never invokes this.
    pub async fn vk_info(&self) -> Result<VkInfo, ClientError> {
        let endpoint = format!("{}/vk-info", self.base_url);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                endpoint,
                status,
                body,
            });
        }

        response
            .json::<VkInfo>()
            .await
            .map_err(|source| ClientError::Deserialization { endpoint, source })
    }
}

#[async_trait]
impl VerificationApi for VerifierClient {
    /// Submit the public proof artifact for verification.
    ///
    /// The payload is exactly `{proof, publicSignals}`; the signature makes
    /// it impossible to hand this function the raw input or the witness.
    async fn verify(
        &self,
        proof: &Groth16Proof,
        public_signals: &[String],
    ) -> Result<VerifyResponse, ClientError> {
        let endpoint = format!("{}/verify", self.base_url);
        let request = VerifyRequest {
            proof,
            public_signals,
        };

        tracing::debug!(endpoint = %endpoint, "submitting proof for verification");

        let response = self
            .http
            .post(&endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                endpoint: endpoint.clone(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                endpoint,
                status,
                body,
            });
        }

        response
            .json::<VerifyResponse>()
            .await
            .map_err(|source| ClientError::Deserialization { endpoint, source })
    }
}
