//! # zkap-client — Verification Service Client
//!
//! Typed HTTP client for the remote proof-verification service. Two
//! endpoints: `POST /verify` (the pairing check on the public artifact) and
//! `GET /vk-info` (display-only key metadata).
//!
//! The privacy boundary is enforced in the types: the verify payload is
//! built from exactly `{proof, publicSignals}` and the contract signature
//! never receives the workflow context, so no private data can reach the
//! wire from here.

pub mod api;
pub mod client;
pub mod error;
#[cfg(feature = "mock")]
pub mod mock;
pub mod types;

pub use api::VerificationApi;
pub use client::{VerifierClient, VerifierConfig};
pub use error::ClientError;
#[cfg(feature = "mock")]
pub use mock::{MockVerdict, MockVerifier};
pub use types::{VerifyRequest, VerifyResponse, VkInfo};
