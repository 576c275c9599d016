//! Wire types for the verification service.

use serde::{Deserialize, Serialize};
use zkap_engine::Groth16Proof;

/// Body of a `POST /verify` request.
///
/// Exactly two fields, both borrowed from the public proof artifact. The
/// type cannot be built from a workflow context or a witness: constructing
/// it requires precisely the proof and the public signals, nothing else.
#[derive(Debug, Serialize)]
pub struct VerifyRequest<'a> {
    pub proof: &'a Groth16Proof,
    #[serde(rename = "publicSignals")]
    pub public_signals: &'a [String],
}

/// Response to a `POST /verify` request.
///
/// The service may attach explanatory fields beyond the verdict (statement,
/// protocol, curve, and so on); they are retained as opaque diagnostics for
/// display and never consulted by control logic.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub verified: bool,
    #[serde(default)]
    pub under18: Option<bool>,
    #[serde(flatten)]
    pub diagnostics: serde_json::Map<String, serde_json::Value>,
}

impl VerifyResponse {
    /// A bare response with the given verdict and no diagnostics.
    pub fn with_verdict(verified: bool) -> Self {
        Self {
            verified,
            under18: None,
            diagnostics: serde_json::Map::new(),
        }
    }
}

/// Response to `GET /vk-info`. Display-only metadata about the loaded
/// verification key; the workflow never branches on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VkInfo {
    pub protocol: String,
    pub curve: String,
    pub n_public: u64,
    pub threshold: u64,
    #[serde(default)]
    pub circuit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_proof() -> Groth16Proof {
        Groth16Proof {
            pi_a: vec!["1".into(), "2".into(), "1".into()],
            pi_b: vec![
                vec!["1".into(), "2".into()],
                vec!["3".into(), "4".into()],
                vec!["1".into(), "0".into()],
            ],
            pi_c: vec!["5".into(), "6".into(), "1".into()],
            protocol: "groth16".into(),
            curve: "bn128".into(),
        }
    }

    #[test]
    fn verify_request_serializes_exactly_two_keys() {
        let proof = sample_proof();
        let signals = vec!["18".to_string()];
        let request = VerifyRequest {
            proof: &proof,
            public_signals: &signals,
        };
        let value = serde_json::to_value(&request).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["proof", "publicSignals"]);
    }

    #[test]
    fn verify_response_parses_minimal_body() {
        let response: VerifyResponse = serde_json::from_str(r#"{"verified": true}"#).unwrap();
        assert!(response.verified);
        assert!(response.under18.is_none());
        assert!(response.diagnostics.is_empty());
    }

    #[test]
    fn verify_response_keeps_extra_fields_as_diagnostics() {
        let body = r#"{
            "verified": true,
            "statement": "Prover knows age >= 18",
            "protocol": "Groth16",
            "zero_knowledge": true
        }"#;
        let response: VerifyResponse = serde_json::from_str(body).unwrap();
        assert!(response.verified);
        assert_eq!(
            response.diagnostics.get("statement").unwrap(),
            "Prover knows age >= 18"
        );
        assert_eq!(response.diagnostics.len(), 3);
    }

    #[test]
    fn vk_info_parses_camel_case() {
        let body = r#"{
            "protocol": "groth16",
            "curve": "bn128",
            "nPublic": 1,
            "threshold": 18,
            "circuit": "age_check"
        }"#;
        let info: VkInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.n_public, 1);
        assert_eq!(info.threshold, 18);
        assert_eq!(info.circuit.as_deref(), Some("age_check"));
    }
}
