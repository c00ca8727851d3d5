//! Compile-time embedded schema assets.
//!
//! The node contract is baked into the binary so a compiler run never
//! depends on schema files being present in the source tree.

/// Draft 2020-12 schema describing the codex node contract.
pub const NODE_SCHEMA_JSON: &str = include_str!("../../schemas/node.schema.json");

/// Parse the embedded node schema document.
pub fn node_schema() -> serde_json::Value {
    serde_json::from_str(NODE_SCHEMA_JSON).expect("embedded node schema is valid JSON")
}
