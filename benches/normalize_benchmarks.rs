//! Normalizer benchmarks
//!
//! Benchmarks for the render-path transforms:
//! - Experiment history of growing size (decoded and as text)
//! - Execution output with long structured logs
//!
//! Measure before optimizing: these run on every render.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dvc_console::execution::ExecutionSummary;
use dvc_console::experiment::ExperimentNormalizer;
use serde_json::{json, Value};

/// Create an experiment-history payload with `commits` groups of 4 experiments each
fn create_history(commits: usize) -> Value {
    let mut nodes = vec![json!({"rev": "workspace", "data": {"timestamp": null}})];
    for commit in 0..commits {
        let experiments: Vec<Value> = (0..4)
            .map(|exp| {
                let lr = [0.001, 0.01, 0.05, 0.1][exp];
                json!({
                    "name": format!("exp-{commit}-{exp}"),
                    "revs": [{
                        "rev": format!("{commit:06x}{exp:02x}"),
                        "data": {
                            "timestamp": "2024-06-03T10:15:00",
                            "params": {"params.yaml": {"data": {
                                "seed": 42,
                                "train": {"lr": lr, "epochs": 5},
                                "prepare": {"split": 0.2}
                            }}},
                            "metrics": {"eval/metrics.json": {"data": {
                                "accuracy": 0.9,
                                "loss": {"train": 0.04, "test": 0.07}
                            }}},
                            "deps": {"data/raw.csv": {"hash": "md5"}},
                            "outs": {"models/model.pkl": {"hash": "md5"}}
                        }
                    }]
                })
            })
            .collect();
        nodes.push(json!({"rev": format!("{commit:08x}"), "experiments": experiments}));
    }
    Value::Array(nodes)
}

/// Create an execution output with `lines` structured log entries
fn create_execution_output(lines: usize) -> Value {
    let logs: Vec<Value> = (0..lines)
        .map(|i| json!({"type": "stage_start", "message": format!("Running stage 'stage_{i}'")}))
        .collect();
    json!({
        "summary": {"stages_executed": lines, "stages_skipped": 0, "stages_failed": 0},
        "pipeline_stats": {"executed_stages": [], "parameters_used": {"train.lr": 0.01}},
        "structured_logs": logs
    })
}

/// Benchmark normalizing decoded payloads
fn bench_normalize_history(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_history");
    let normalizer = ExperimentNormalizer::new();

    for commits in [10, 100, 1_000].iter() {
        let payload = create_history(*commits);
        group.bench_with_input(BenchmarkId::from_parameter(commits), &payload, |b, payload| {
            b.iter(|| black_box(normalizer.normalize(black_box(payload))));
        });
    }

    group.finish();
}

/// Benchmark normalizing payload text (parse included)
fn bench_normalize_history_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_history_text");
    let normalizer = ExperimentNormalizer::new();

    for commits in [10, 100].iter() {
        let text = create_history(*commits).to_string();
        group.bench_with_input(BenchmarkId::from_parameter(commits), &text, |b, text| {
            b.iter(|| black_box(normalizer.normalize_str(black_box(text))));
        });
    }

    group.finish();
}

/// Benchmark execution output normalization
fn bench_execution_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("execution_summary");

    for lines in [100, 10_000].iter() {
        let output = create_execution_output(*lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &output, |b, output| {
            b.iter(|| black_box(ExecutionSummary::from_output(Some(black_box(output)))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize_history,
    bench_normalize_history_text,
    bench_execution_summary
);
criterion_main!(benches);
