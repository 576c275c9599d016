//! # zkap CLI entry point
//!
//! Thin presentation layer over the workflow orchestrator: parses
//! arguments, wires an engine and a verification client, runs exactly one
//! proof workflow, and renders the event log terminal-style. All workflow
//! state lives in the orchestrator; this binary only subscribes to it.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use zkap_client::{VerificationApi, VerifierClient, VerifierConfig};
use zkap_core::{Outcome, Severity, WorkflowConfig};
use zkap_engine::{MockEngine, ProvingEngine, SnarkjsConfig, SnarkjsEngine};
use zkap_orchestrator::{Orchestrator, WorkflowError};

/// zkap — prove you are over a threshold age without revealing your birth date.
///
/// The birth date is used only to derive the private witness locally; the
/// verifier receives a Groth16 proof and the public threshold, nothing else.
#[derive(Parser, Debug)]
#[command(name = "zkap", version, about, long_about = None)]
struct Cli {
    /// Date of birth in YYYY-MM-DD form. Never sent anywhere.
    #[arg(long)]
    birth_date: String,

    /// Public threshold for the age predicate.
    #[arg(long, default_value_t = zkap_core::DEFAULT_THRESHOLD)]
    threshold: u64,

    /// Base URL of the verification service.
    #[arg(long, default_value = "http://localhost:8000")]
    verifier_url: String,

    /// Proving engine to drive.
    #[arg(long, value_enum, default_value = "mock")]
    engine: EngineKind,

    /// Compiled circuit program, e.g. age_check.wasm (snarkjs engine only).
    #[arg(long)]
    circuit_wasm: Option<PathBuf>,

    /// Proving key, e.g. circuit_final.zkey (snarkjs engine only).
    #[arg(long)]
    proving_key: Option<PathBuf>,

    /// Path to the snarkjs executable.
    #[arg(long, default_value = "snarkjs")]
    snarkjs_bin: PathBuf,

    /// Fixed reference date for witness derivation (defaults to today).
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    /// Deterministic mock engine (no external tooling required).
    Mock,
    /// External snarkjs CLI (requires --circuit-wasm and --proving-key).
    Snarkjs,
}

fn build_engine(cli: &Cli) -> anyhow::Result<Arc<dyn ProvingEngine>> {
    match cli.engine {
        EngineKind::Mock => Ok(Arc::new(MockEngine::new())),
        EngineKind::Snarkjs => {
            let wasm = cli
                .circuit_wasm
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--circuit-wasm is required with --engine snarkjs"))?;
            let zkey = cli
                .proving_key
                .clone()
                .ok_or_else(|| anyhow::anyhow!("--proving-key is required with --engine snarkjs"))?;
            let config = SnarkjsConfig::new(wasm, zkey).with_bin(cli.snarkjs_bin.clone());
            Ok(Arc::new(SnarkjsEngine::new(config)))
        }
    }
}

fn severity_prefix(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "$",
        Severity::Success => "+",
        Severity::Error => "!",
        Severity::Trace => "~",
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let engine = build_engine(&cli)?;

    let client = Arc::new(VerifierClient::new(
        VerifierConfig::new(cli.verifier_url.clone()),
    )?);

    // Display-only key metadata; absence must not affect the workflow.
    match client.vk_info().await {
        Ok(info) => println!(
            "verifier: {} on {} ({} public input(s), threshold {})",
            info.protocol, info.curve, info.n_public, info.threshold
        ),
        Err(e) => tracing::debug!("vk-info unavailable: {e}"),
    }

    let mut config =
        WorkflowConfig::new(cli.verifier_url.clone()).with_threshold(cli.threshold);
    if let Some(reference) = cli.reference_date {
        config = config.with_reference_date(reference);
    }

    let orchestrator = Arc::new(Orchestrator::new(
        config,
        engine,
        client as Arc<dyn VerificationApi>,
    ));

    // Subscribe and narrate phase transitions while the run is in flight.
    let mut rx = orchestrator.subscribe();
    let watcher = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow().clone();
            tracing::info!(phase = %snapshot.phase, "phase transition");
        }
    });

    let result = orchestrator.start(&cli.birth_date).await;
    watcher.abort();

    for entry in orchestrator.events() {
        println!("{} {}", severity_prefix(entry.severity), entry.message);
    }

    match result {
        Ok(Outcome::Verified) => {
            println!("result: proof verified");
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Invalid) => {
            println!("result: proof rejected by the verifier");
            Ok(ExitCode::from(1))
        }
        Ok(Outcome::UnderThreshold) => {
            println!(
                "result: no proof possible, the predicate age >= {} does not hold",
                cli.threshold
            );
            Ok(ExitCode::from(1))
        }
        Err(WorkflowError::AlreadyRunning | WorkflowError::Superseded) => {
            // Single-shot binary: neither can actually happen here.
            Ok(ExitCode::from(2))
        }
        Err(e) => {
            eprintln!("error: {e}");
            Ok(ExitCode::from(2))
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
