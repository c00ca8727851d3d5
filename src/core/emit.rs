//! Artifact serialization.
//!
//! Artifacts are plain JSON documents with 2-space indentation, stable key
//! ordering, and non-ASCII preserved literally. The node list follows
//! discovery order; everything else is written verbatim. Missing optional
//! inputs suppress the corresponding file, never an error.

use crate::core::collect::Collection;
use crate::core::config::CodexConfig;
use crate::core::error::CodexError;
use crate::core::time::BuildStamp;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Counts reported by a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub nodes: usize,
    pub cards: usize,
    pub versions_total: usize,
}

impl std::fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "codex.json built with {} nodes ({} alternate versions); {} cards.",
            self.nodes, self.versions_total, self.cards
        )
    }
}

/// Serialize `payload` to `path`, creating parent directories as needed.
pub fn write_json(path: &Path, payload: &Value) -> Result<(), CodexError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(payload)?;
    fs::write(path, text)?;
    Ok(())
}

/// Write every artifact for `collection` under the configured dist
/// directory and return the summary counts.
pub fn write_artifacts(
    config: &CodexConfig,
    collection: &Collection,
    stamp: &BuildStamp,
) -> Result<BuildSummary, CodexError> {
    fs::create_dir_all(&config.dist_dir)?;

    let summary = BuildSummary {
        nodes: collection.nodes.len(),
        cards: collection.cards.len(),
        versions_total: collection.nodes.versions_total(),
    };

    let node_list: Vec<Value> = collection.nodes.in_order().into_iter().cloned().collect();
    write_json(
        &config.dist_dir.join("codex.json"),
        &json!({ "nodes": node_list }),
    )?;

    let meta = json!({
        "built_utc": stamp.built_utc,
        "git_commit": stamp.commit,
        "counts": {
            "nodes": summary.nodes,
            "cards": summary.cards,
            "versions_total": summary.versions_total,
        },
    });
    write_json(&config.dist_dir.join("index.json"), &meta)?;

    if !collection.cards.is_empty() {
        write_json(
            &config.dist_dir.join("cards.json"),
            &json!({ "cards": collection.cards }),
        )?;
    }

    if let Some(tokens) = &collection.tokens {
        write_json(&config.tokens_artifact_path(), tokens)?;
    }

    if let Some(cosmology) = &collection.cosmology {
        write_json(&config.dist_dir.join("cosmo_codex.json"), cosmology)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_matches_report_format() {
        let summary = BuildSummary {
            nodes: 3,
            cards: 2,
            versions_total: 1,
        };
        assert_eq!(
            summary.to_string(),
            "codex.json built with 3 nodes (1 alternate versions); 2 cards."
        );
    }

    #[test]
    fn write_json_creates_nested_directories_and_preserves_unicode() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("c99").join("tokens").join("perm-style.json");
        write_json(&path, &json!({"glyph": "☿", "indent": true})).expect("write");

        let text = fs::read_to_string(&path).expect("read back");
        assert!(text.contains("☿"), "non-ASCII must stay literal");
        assert!(text.contains("  \"glyph\""), "2-space indentation");
    }
}
