//! snarkjs subprocess engine.
//!
//! Drives the external snarkjs CLI (`snarkjs groth16 fullprove`) to produce
//! a proof from the compiled circuit program (`.wasm`) and proving key
//! (`.zkey`). The engine owns the privacy-sensitive hand-off: the witness
//! input file lives in a private temp directory and is removed immediately
//! after the subprocess exits, before the proof output is even parsed.
//!
//! ## Failure classification
//!
//! - binary or handle artifacts missing: `Unavailable`
//! - witness-calculator assertion failure ("Assert Failed"): the circuit
//!   constraint is unsatisfiable for this witness, `ConstraintUnsatisfied`.
//!   This is the only evidence accepted for that variant; any other nonzero
//!   exit stays `Other` even when the witness happens to be under threshold.
//! - unparseable proof output: `MalformedProof`

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use zkap_core::PrivateWitness;

use crate::artifact::{Groth16Proof, ProofArtifact};
use crate::error::EngineError;
use crate::traits::ProvingEngine;

/// Marker snarkjs prints when the witness calculator hits a violated
/// circuit assertion.
const ASSERT_FAILED_MARKER: &str = "Assert Failed";

/// Configuration for the snarkjs engine.
#[derive(Debug, Clone)]
pub struct SnarkjsConfig {
    /// Path to the snarkjs executable.
    pub snarkjs_bin: PathBuf,
    /// Compiled circuit program (`age_check.wasm`).
    pub circuit_wasm: PathBuf,
    /// Proving key from the trusted setup (`circuit_final.zkey`).
    pub proving_key: PathBuf,
    /// Timeout for one proving call.
    pub timeout: Duration,
}

impl SnarkjsConfig {
    /// Create a configuration with the default binary name and timeout.
    pub fn new(circuit_wasm: impl Into<PathBuf>, proving_key: impl Into<PathBuf>) -> Self {
        Self {
            snarkjs_bin: PathBuf::from("snarkjs"),
            circuit_wasm: circuit_wasm.into(),
            proving_key: proving_key.into(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Override the snarkjs binary path.
    pub fn with_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.snarkjs_bin = bin.into();
        self
    }

    /// Override the proving timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Proving engine backed by the snarkjs CLI.
pub struct SnarkjsEngine {
    config: SnarkjsConfig,
    handles: OnceCell<()>,
}

impl SnarkjsEngine {
    pub fn new(config: SnarkjsConfig) -> Self {
        Self {
            config,
            handles: OnceCell::new(),
        }
    }

    /// Check that the circuit program and proving key exist on disk.
    async fn check_handles(&self) -> Result<(), EngineError> {
        for (label, path) in [
            ("circuit program", &self.config.circuit_wasm),
            ("proving key", &self.config.proving_key),
        ] {
            if tokio::fs::metadata(path).await.is_err() {
                return Err(EngineError::Unavailable {
                    reason: format!("{label} not found at {}", path.display()),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProvingEngine for SnarkjsEngine {
    fn name(&self) -> &str {
        "snarkjs"
    }

    async fn ensure_loaded(&self) -> Result<(), EngineError> {
        self.handles
            .get_or_try_init(|| self.check_handles())
            .await
            .map(|_| ())
    }

    async fn prove(
        &self,
        witness: &PrivateWitness,
        threshold: u64,
    ) -> Result<ProofArtifact, EngineError> {
        let workdir = tempfile::tempdir().map_err(|e| EngineError::Other {
            reason: format!("failed to create temp dir: {e}"),
        })?;

        let input_path = workdir.path().join("input.json");
        let proof_path = workdir.path().join("proof.json");
        let public_path = workdir.path().join("public.json");

        // Circuit input names match the age_check circuit signals.
        let input = serde_json::json!({
            "age": witness.expose(),
            "threshold": threshold,
        });
        tokio::fs::write(&input_path, input.to_string())
            .await
            .map_err(|e| EngineError::Other {
                reason: format!("failed to write prover input: {e}"),
            })?;

        let mut cmd = tokio::process::Command::new(&self.config.snarkjs_bin);
        cmd.arg("groth16")
            .arg("fullprove")
            .arg(&input_path)
            .arg(&self.config.circuit_wasm)
            .arg(&self.config.proving_key)
            .arg(&proof_path)
            .arg(&public_path)
            .kill_on_drop(true);

        tracing::debug!(engine = self.name(), "invoking snarkjs groth16 fullprove");

        let output = tokio::time::timeout(self.config.timeout, cmd.output()).await;

        // The input file holds the private witness: remove it before doing
        // anything else with the result.
        let _ = tokio::fs::remove_file(&input_path).await;

        let output = match output {
            Err(_) => {
                return Err(EngineError::Other {
                    reason: format!(
                        "snarkjs timed out after {}s",
                        self.config.timeout.as_secs()
                    ),
                })
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EngineError::Unavailable {
                    reason: format!(
                        "snarkjs binary not found at {}",
                        self.config.snarkjs_bin.display()
                    ),
                })
            }
            Ok(Err(e)) => {
                return Err(EngineError::Other {
                    reason: format!("failed to run snarkjs: {e}"),
                })
            }
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            if stderr.contains(ASSERT_FAILED_MARKER) || stdout.contains(ASSERT_FAILED_MARKER) {
                return Err(EngineError::ConstraintUnsatisfied);
            }
            let excerpt: String = stderr.chars().take(400).collect();
            return Err(EngineError::Other {
                reason: format!("snarkjs exited with {}: {excerpt}", output.status),
            });
        }

        let proof_json = tokio::fs::read_to_string(&proof_path)
            .await
            .map_err(|e| EngineError::MalformedProof {
                reason: format!("proof output missing: {e}"),
            })?;
        let public_json = tokio::fs::read_to_string(&public_path)
            .await
            .map_err(|e| EngineError::MalformedProof {
                reason: format!("public signal output missing: {e}"),
            })?;

        let proof: Groth16Proof =
            serde_json::from_str(&proof_json).map_err(|e| EngineError::MalformedProof {
                reason: format!("proof output did not parse: {e}"),
            })?;
        let public_signals: Vec<String> =
            serde_json::from_str(&public_json).map_err(|e| EngineError::MalformedProof {
                reason: format!("public signal output did not parse: {e}"),
            })?;

        let artifact = ProofArtifact {
            proof,
            public_signals,
        };
        artifact.validate()?;
        Ok(artifact)
    }
}
