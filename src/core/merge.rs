//! Append-only merge of node fragments sharing one identifier.
//!
//! Identifiers are stable across a long-lived corpus; the same id may
//! accrue identical mirrors and divergent drafts from many files. Equal
//! content folds provenance together. Divergent content is archived under
//! `versions`, deduplicated by canonical content hash, and never promoted
//! over the live record.

use crate::core::provenance::sources_mut;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Copy of a node without `provenance`/`versions` bookkeeping.
fn strip_meta(node: &Value) -> Value {
    match node.as_object() {
        Some(object) => {
            let mut clone = object.clone();
            clone.remove("provenance");
            clone.remove("versions");
            Value::Object(clone)
        }
        None => node.clone(),
    }
}

/// Structural equality over payload fields only.
pub fn nodes_equal(left: &Value, right: &Value) -> bool {
    strip_meta(left) == strip_meta(right)
}

/// 16-hex-character fingerprint over key-sorted JSON serialization.
///
/// serde_json's default map is BTree-ordered, so compact serialization is
/// canonical: structurally equal objects hash identically regardless of
/// source field order.
pub fn content_hash(node: &Value) -> String {
    let canonical = serde_json::to_string(node).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..16].to_string()
}

/// Fold `incoming` into `current` without losing history.
///
/// Equal content: append all incoming provenance sources onto the current
/// record. Differing content: archive `incoming` under `versions`, tagged
/// with its content hash, unless that hash is already present. The live
/// record's payload fields are never overwritten.
pub fn append_only_merge(current: &mut Value, incoming: Value) {
    if nodes_equal(current, &incoming) {
        let incoming_sources = incoming
            .get("provenance")
            .and_then(|p| p.get("sources"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        sources_mut(current).extend(incoming_sources);
        return;
    }

    let hash = content_hash(&incoming);
    let versions = versions_mut(current);
    let already_archived = versions
        .iter()
        .any(|variant| variant.get("_hash").and_then(Value::as_str) == Some(hash.as_str()));
    if !already_archived {
        let mut archived = incoming;
        if let Some(object) = archived.as_object_mut() {
            object.insert("_hash".to_string(), Value::String(hash));
        }
        versions.push(archived);
    }
}

fn versions_mut(node: &mut Value) -> &mut Vec<Value> {
    node.as_object_mut()
        .expect("node fragments are JSON objects")
        .entry("versions")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .expect("versions is an array")
}
