//! WebAssembly bindings for the browser console.
//!
//! The console fetches payloads with its own HTTP client and hands the
//! decoded JSON (or the raw response text) to these functions before
//! rendering.
//!
//! # Architecture
//!
//! ```text
//! fetch() → JS value → wasm-bindgen → ExperimentNormalizer  → JS array
//!                                   → ExecutionSummary      → JS object
//! ```

#![cfg(target_arch = "wasm32")]

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::execution::{ExecutionDetail, ExecutionSummary};
use crate::experiment::ExperimentNormalizer;

/// Initialize WASM module with panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Normalize an experiment-history payload (array or JSON text).
///
/// Always returns an array; unusable payloads yield `[]`.
#[wasm_bindgen(js_name = normalizeExperiments)]
pub fn normalize_experiments(payload: JsValue) -> JsValue {
    let records = from_js(payload)
        .map(|payload| ExperimentNormalizer::new().normalize(&payload))
        .unwrap_or_default();
    to_js(&records)
}

/// Normalize a pipeline execution output payload.
///
/// `undefined`/`null` yield the all-default summary.
#[wasm_bindgen(js_name = normalizeExecutionOutput)]
pub fn normalize_execution_output(payload: JsValue) -> JsValue {
    let summary = ExecutionSummary::from_output(from_js(payload).as_ref());
    to_js(&summary)
}

/// Read a full execution document into the execution view model.
#[wasm_bindgen(js_name = executionDetail)]
pub fn execution_detail(execution: JsValue) -> JsValue {
    let detail = from_js(execution)
        .map(|execution| ExecutionDetail::from_execution(&execution))
        .unwrap_or_default();
    to_js(&detail)
}

fn from_js(value: JsValue) -> Option<Value> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(value) => Some(value),
        Err(err) => {
            console::warn_1(&format!("dvc-console: payload is not JSON-compatible: {err}").into());
            None
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or_else(|err| {
        console::error_1(&format!("dvc-console: serialization failed: {err}").into());
        JsValue::NULL
    })
}
