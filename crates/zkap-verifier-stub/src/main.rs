//! Standalone stub verification server.
//!
//! Serves the `/verify` and `/vk-info` endpoints against the mock pairing
//! check. For development and demos; integration tests embed the router
//! directly instead of spawning this binary.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use zkap_verifier_stub::{router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("ZKAP_VERIFIER_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);

    let threshold: u64 = std::env::var("ZKAP_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(zkap_core::DEFAULT_THRESHOLD);

    let state = AppState::new(threshold);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("zkap-verifier-stub listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server error");
}
