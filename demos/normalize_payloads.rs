//! Normalization Example
//!
//! Normalizes a `dvc exp show --json` dump and an execution output document
//! and prints what the console would render.
//!
//! Run with: cargo run --example normalize_payloads [exp_show.json] [execution.json]
//! Set `RUST_LOG=dvc_console=trace` to see skipped nodes.

use anyhow::{Context, Result};
use dvc_console::execution::{ExecutionDetail, LogKind};
use dvc_console::experiment::{ExperimentNormalizer, ExperimentTable};
use dvc_console::ExecutionConfig;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

fn sample_history() -> Value {
    json!([
        {"rev": "workspace", "data": {
            "params": {"params.yaml": {"data": {"train": {"lr": 0.01, "epochs": 5}}}},
            "metrics": {"eval/metrics.json": {"data": {"accuracy": 0.91}}}
        }},
        {"rev": "4b2d1f0", "experiments": [
            {"name": "lush-rays", "revs": [{"rev": "a1b2c3d", "data": {
                "timestamp": "2024-06-03T10:15:00",
                "params": {"params.yaml": {"data": {"seed": 42, "train": {"lr": 0.1, "epochs": 5}}}},
                "metrics": {"eval/metrics.json": {"data": {"accuracy": 0.87}}}
            }}]}
        ]},
        {"unexpected": "node"}
    ])
}

fn sample_execution() -> Value {
    json!({
        "execution_id": "exec-001",
        "status": "completed",
        "duration": 42.7,
        "models_produced": ["models/model.pkl"],
        "execution_output": {
            "summary": {"stages_executed": 1, "stages_skipped": 1},
            "stdout": "Stage 'prepare' is up to date\nRunning stage 'train':\nPipeline completed successfully."
        }
    })
}

fn load(path: Option<String>, fallback: fn() -> Value) -> Result<Value> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            // Payload text goes through as-is; the normalizer owns parse failures.
            Ok(Value::String(text))
        }
        None => Ok(fallback()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let history = load(args.next(), sample_history)?;
    let execution = load(args.next(), sample_execution)?;

    println!("=== Experiments ===\n");

    let table = ExperimentTable::from(ExperimentNormalizer::new().normalize(&history));
    for record in table.records() {
        println!("{:<10} {:<20} {:?}", record.id(), record.name(), record.created_at());
        for (key, value) in record.params() {
            println!("    param  {key} = {value}");
        }
        for (key, value) in record.metrics() {
            println!("    metric {key} = {}", serde_json::to_string(value)?);
        }
    }

    let committed: Vec<&str> = table.committed().map(|record| record.id()).collect();
    if let [first, ..] = committed.as_slice() {
        if let Some(comparison) = table.compare("workspace", first) {
            println!("\nworkspace vs {first}:");
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
    }

    println!("\n=== Execution ===\n");

    let execution = match execution {
        Value::String(text) => serde_json::from_str(&text).context("parsing execution document")?,
        other => other,
    };
    let detail = ExecutionDetail::from_execution_with(
        &execution,
        ExecutionConfig::new().derive_from_stdout(true),
    );
    println!(
        "{} [{:?}] {} executed, {} skipped, {} failed",
        detail.execution_id,
        detail.status,
        detail.summary.stages_executed,
        detail.summary.stages_skipped,
        detail.summary.stages_failed
    );
    for log in &detail.summary.structured_logs {
        let marker = match log.kind {
            LogKind::StageStart => ">",
            LogKind::StageSkipped => "-",
            LogKind::Error => "!",
            LogKind::PipelineStatus => "=",
            LogKind::Info => " ",
        };
        println!("  {marker} {}", log.message);
    }
    println!("  models: {:?}", detail.summary.models_produced);

    Ok(())
}
