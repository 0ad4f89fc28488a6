//! Parameter Flattener - two-level params namespace to dotted keys
//!
//! DVC reports params per file: `{"params.yaml": {"data": {<section>: {...}}}}`.
//! Each `(section, key)` pair becomes one `"section.key"` entry.

use serde_json::{Map, Value};

use crate::config::ScalarParams;

/// Flatten the params of one file into dotted keys.
///
/// Reads `params[file_label].data`. For every section whose value is an
/// object, emits `"{section}.{key}" → value` in section order then key
/// order. Sections holding a primitive, array or null are dropped under
/// [`ScalarParams::Drop`] and kept as `"{reserved}.{section}"` under
/// [`ScalarParams::Reserved`].
///
/// Malformed input degrades to an empty map.
///
/// # Example
///
/// ```rust
/// use dvc_console::config::ScalarParams;
/// use dvc_console::experiment::flatten_params;
/// use serde_json::json;
///
/// let params = json!({"params.yaml": {"data": {"seed": 42, "train": {"lr": 0.01}}}});
/// let flat = flatten_params(&params, "params.yaml", &ScalarParams::Drop);
/// assert_eq!(flat.get("train.lr"), Some(&json!(0.01)));
/// assert!(flat.get("seed").is_none());
/// ```
#[must_use]
pub fn flatten_params(params: &Value, file_label: &str, policy: &ScalarParams) -> Map<String, Value> {
    let mut flat = Map::new();

    let Some(sections) = params
        .get(file_label)
        .and_then(|file| file.get("data"))
        .and_then(Value::as_object)
    else {
        return flat;
    };

    for (section, value) in sections {
        match (value, policy) {
            (Value::Object(entries), _) => {
                for (key, value) in entries {
                    flat.insert(format!("{section}.{key}"), value.clone());
                }
            }
            (_, ScalarParams::Drop) => {}
            (_, ScalarParams::Reserved(reserved)) => {
                flat.insert(format!("{reserved}.{section}"), value.clone());
            }
        }
    }

    flat
}
