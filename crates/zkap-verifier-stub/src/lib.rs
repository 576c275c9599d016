//! # zkap-verifier-stub — Stub Verification Service
//!
//! In-memory implementation of the verification endpoints the workflow
//! client calls (`POST /verify`, `GET /vk-info`). The pairing math itself
//! stays behind the [`pairing::PairingCheck`] trait; the shipped
//! implementation matches the deterministic mock proving engine, which is
//! enough to exercise every branch of the workflow end to end, including a
//! genuine "pairing check failed" verdict for tampered proofs.
//!
//! Runs standalone via the `zkap-verifier-stub` binary, or embedded in
//! integration tests through [`routes::router`].

pub mod pairing;
pub mod routes;
pub mod store;

pub use pairing::{MockPairingCheck, PairingCheck};
pub use routes::router;
pub use store::{AppState, VkDescriptor};
