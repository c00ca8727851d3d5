//! Node contract validation.
//!
//! The validator is an explicit instance constructed once at startup from a
//! schema document and handed to the orchestrator. The primary path runs
//! full draft 2020-12 validation and reports every violation at once; when
//! the schema document cannot be compiled, a minimal fallback enforces only
//! the identifier contract.

use crate::core::assets;
use crate::core::error::CodexError;
use jsonschema::{Draft, Validator};
use regex::Regex;
use serde_json::Value;

/// Identifier grammar: `C144N-` + three digits, or `C144N-ARCANA-` + one or
/// more of `[A-Z0-9_-]`.
pub const NODE_ID_PATTERN: &str = "^(C144N-[0-9]{3}|C144N-ARCANA-[A-Z0-9_-]+)$";

pub struct NodeValidator {
    compiled: Option<Validator>,
    id_pattern: Regex,
}

impl NodeValidator {
    /// Build a validator from the embedded node schema.
    pub fn from_embedded() -> Self {
        Self::from_schema(&assets::node_schema())
    }

    /// Build a validator from an explicit schema document. A schema that
    /// fails to compile degrades to the minimal identifier check rather
    /// than aborting startup.
    pub fn from_schema(schema: &Value) -> Self {
        let compiled = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema)
            .ok();
        Self {
            compiled,
            id_pattern: Regex::new(NODE_ID_PATTERN).unwrap(),
        }
    }

    /// Check `node` against the contract. Collects all violations, sorted
    /// by instance path, into one aggregated error naming `source_label`.
    pub fn validate(&self, node: &Value, source_label: &str) -> Result<(), CodexError> {
        match &self.compiled {
            Some(validator) => {
                let mut violations: Vec<(String, String)> = match validator.validate(node) {
                    Ok(()) => return Ok(()),
                    Err(errors) => errors
                        .map(|err| (err.instance_path.to_string(), err.to_string()))
                        .collect(),
                };
                violations.sort();
                Err(CodexError::SchemaViolation {
                    source_label: source_label.to_string(),
                    violations: violations
                        .into_iter()
                        .map(|(path, message)| format!("{}: {}", path, message))
                        .collect(),
                })
            }
            None => self.ensure_minimum(node, source_label),
        }
    }

    /// Fallback contract: `id` present, a string, matching the identifier
    /// grammar. First failure wins.
    fn ensure_minimum(&self, node: &Value, source_label: &str) -> Result<(), CodexError> {
        let violation = |message: &str| CodexError::SchemaViolation {
            source_label: source_label.to_string(),
            violations: vec![message.to_string()],
        };
        let Some(id) = node.get("id") else {
            return Err(violation("/id: missing 'id'"));
        };
        let Some(id) = id.as_str() else {
            return Err(violation("/id: id must be a string"));
        };
        if !self.id_pattern.is_match(id) {
            return Err(violation(&format!(
                "/id: id '{}' does not match pattern {}",
                id, NODE_ID_PATTERN
            )));
        }
        Ok(())
    }
}
