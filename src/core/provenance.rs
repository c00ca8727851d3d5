//! Provenance stamping for node fragments.
//!
//! Every fragment entering the pipeline gets a source entry recording where
//! it came from and under which build. Entries accumulate; they are never
//! rewritten or deduplicated.

use crate::core::time::{BuildStamp, COMPILER_TAG};
use serde_json::{Value, json};

/// Return a copy of `node` with a provenance source entry appended.
///
/// The input is left untouched. `provenance.sources` is created when the
/// fragment carries none.
pub fn annotate(node: &Value, source_path: &str, stamp: &BuildStamp) -> Value {
    let mut snapshot = node.clone();
    let entry = json!({
        "path": source_path,
        "commit": stamp.commit,
        "timestamp": stamp.built_utc,
        "compiler": COMPILER_TAG,
    });
    sources_mut(&mut snapshot).push(entry);
    snapshot
}

/// Mutable access to `provenance.sources`, creating the scaffolding on
/// first use. Malformed bookkeeping shapes (a non-object `provenance`, a
/// non-array `sources`) are replaced rather than honored; provenance is
/// compiler-owned and never part of payload equality.
pub fn sources_mut(node: &mut Value) -> &mut Vec<Value> {
    let object = node
        .as_object_mut()
        .expect("node fragments are JSON objects");
    let provenance = object.entry("provenance").or_insert_with(|| json!({}));
    if !provenance.is_object() {
        *provenance = json!({});
    }
    let sources = provenance
        .as_object_mut()
        .unwrap()
        .entry("sources")
        .or_insert_with(|| json!([]));
    if !sources.is_array() {
        *sources = json!([]);
    }
    sources.as_array_mut().unwrap()
}
