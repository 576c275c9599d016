//! Route definitions for the stub verification service.
//!
//! Implements the endpoints the workflow client actually calls, with
//! responses that deserialize cleanly into the client's types (camelCase
//! JSON, correct field shapes). The server never receives, parses, or
//! stores anything but the public proof artifact.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use zkap_engine::Groth16Proof;

use crate::store::AppState;

/// Build the complete router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/vk-info", get(vk_info))
        .route("/verify", post(verify))
        .fallback(not_implemented)
        .with_state(state)
}

// ── Service descriptor ──────────────────────────────────────────────

async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": "zkap verifier stub",
        "version": env!("CARGO_PKG_VERSION"),
        "vkLoaded": state.vk().is_some(),
        "protocol": "groth16",
        "curve": "bn128",
    }))
}

// ── Verification key info ───────────────────────────────────────────

async fn vk_info(State(state): State<AppState>) -> Response {
    match state.vk() {
        Some(vk) => Json(json!({
            "protocol": vk.protocol,
            "curve": vk.curve,
            "nPublic": vk.n_public,
            "threshold": state.threshold(),
            "circuit": "age_check",
        }))
        .into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"detail": "Verification key not loaded"})),
        )
            .into_response(),
    }
}

// ── Proof verification ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct VerifyBody {
    proof: Groth16Proof,
    #[serde(rename = "publicSignals")]
    public_signals: Vec<String>,
}

async fn verify(State(state): State<AppState>, Json(body): Json<VerifyBody>) -> Response {
    state.record_verify_hit();

    let Some(_vk) = state.vk() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"detail": "Verification key not loaded"})),
        )
            .into_response();
    };

    if body.public_signals.len() != 1 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "publicSignals must have exactly 1 element"})),
        )
            .into_response();
    }

    let threshold = state.threshold();
    match body.public_signals[0].parse::<u64>() {
        Ok(value) if value == threshold => {}
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "Invalid threshold"})),
            )
                .into_response();
        }
    }

    let verified = state.pairing().check(&body.proof, &body.public_signals);
    tracing::info!(verified, "pairing check completed");

    Json(json!({
        "verified": verified,
        "statement": format!("Prover knows age >= {threshold}"),
        "protocol": "Groth16",
        "curve": "BN128",
        "zero_knowledge": true,
        "what_server_learned": format!("age >= {threshold}: {verified}"),
        "what_server_did_not_learn": "the actual age or birthdate",
    }))
    .into_response()
}

// ── Fallback ────────────────────────────────────────────────────────

async fn not_implemented() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use zkap_engine::mock::mock_proof;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn verify_request(body: &serde_json::Value) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/verify")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap()
    }

    fn valid_body(threshold: u64) -> serde_json::Value {
        let signals = vec![threshold.to_string()];
        json!({
            "proof": mock_proof(&signals),
            "publicSignals": signals,
        })
    }

    #[tokio::test]
    async fn root_reports_vk_loaded() {
        let app = router(AppState::new(18));
        let req = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["vkLoaded"], true);
    }

    #[tokio::test]
    async fn vk_info_shape_matches_client() {
        let app = router(AppState::new(18));
        let req = axum::http::Request::builder()
            .uri("/vk-info")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["protocol"], "groth16");
        assert_eq!(body["nPublic"], 1);
        assert_eq!(body["threshold"], 18);
    }

    #[tokio::test]
    async fn vk_info_503_when_vk_missing() {
        let app = router(AppState::without_vk(18));
        let req = axum::http::Request::builder()
            .uri("/vk-info")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn verify_accepts_a_faithful_proof() {
        let state = AppState::new(18);
        let app = router(state.clone());
        let resp = app.oneshot(verify_request(&valid_body(18))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["verified"], true);
        assert_eq!(body["what_server_did_not_learn"], "the actual age or birthdate");
        assert_eq!(state.verify_hits(), 1);
    }

    #[tokio::test]
    async fn verify_rejects_a_tampered_proof_as_200_false() {
        let mut body = valid_body(18);
        body["proof"]["pi_a"][0] = json!("999999");
        let app = router(AppState::new(18));
        let resp = app.oneshot(verify_request(&body)).await.unwrap();
        // A failed pairing check is a well-formed negative verdict, not an
        // HTTP error.
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["verified"], false);
    }

    #[tokio::test]
    async fn verify_400_on_wrong_signal_count() {
        let mut body = valid_body(18);
        body["publicSignals"] = json!(["18", "1"]);
        let app = router(AppState::new(18));
        let resp = app.oneshot(verify_request(&body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert!(body["detail"].as_str().unwrap().contains("exactly 1"));
    }

    #[tokio::test]
    async fn verify_400_on_wrong_threshold() {
        let app = router(AppState::new(18));
        let resp = app.oneshot(verify_request(&valid_body(21))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn verify_503_when_vk_missing() {
        let app = router(AppState::without_vk(18));
        let resp = app.oneshot(verify_request(&valid_body(18))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unknown_path_returns_501() {
        let app = router(AppState::new(18));
        let req = axum::http::Request::builder()
            .uri("/some/unknown/path")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
