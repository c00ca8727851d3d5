//! Source-tree collection and orchestration.
//!
//! One linear pass over the staged tree: loose node files, then markdown
//! ledgers, then cards, then the token and cosmology documents. Files are
//! processed in sorted-path order within each pass and the pass order is
//! fixed, so merge results are deterministic regardless of filesystem
//! iteration order.
//!
//! Malformed files never stop a run; a node that fails the schema contract
//! always does. That asymmetry is deliberate: tolerate a messy tree, never
//! emit a non-conforming node.

use crate::core::config::CodexConfig;
use crate::core::error::CodexError;
use crate::core::extract::extract_json_blocks;
use crate::core::merge::append_only_merge;
use crate::core::provenance::annotate;
use crate::core::schema::NodeValidator;
use crate::core::time::BuildStamp;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Accumulating id→node mapping that remembers discovery order.
#[derive(Debug, Default)]
pub struct NodeSet {
    order: Vec<String>,
    nodes: FxHashMap<String, Value>,
}

impl NodeSet {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.nodes.get(id)
    }

    /// First sighting inserts as-is; later sightings merge append-only.
    pub fn insert_or_merge(&mut self, id: &str, node: Value) {
        match self.nodes.get_mut(id) {
            Some(current) => append_only_merge(current, node),
            None => {
                self.order.push(id.to_string());
                self.nodes.insert(id.to_string(), node);
            }
        }
    }

    /// Nodes in discovery order.
    pub fn in_order(&self) -> Vec<&Value> {
        self.order
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    /// Total archived variants across all nodes.
    pub fn versions_total(&self) -> usize {
        self.nodes
            .values()
            .filter_map(|node| node.get("versions"))
            .filter_map(Value::as_array)
            .map(Vec::len)
            .sum()
    }
}

/// Everything one compiler run assembles in memory.
#[derive(Debug, Default)]
pub struct Collection {
    pub nodes: NodeSet,
    pub cards: Vec<Value>,
    pub tokens: Option<Value>,
    pub cosmology: Option<Value>,
}

pub struct Collector<'a> {
    config: &'a CodexConfig,
    validator: &'a NodeValidator,
    stamp: &'a BuildStamp,
}

impl<'a> Collector<'a> {
    pub fn new(config: &'a CodexConfig, validator: &'a NodeValidator, stamp: &'a BuildStamp) -> Self {
        Self {
            config,
            validator,
            stamp,
        }
    }

    /// Run all four passes over the staged tree.
    pub fn collect(&self) -> Result<Collection, CodexError> {
        let mut collection = Collection::default();
        self.collect_node_files(&mut collection)?;
        self.collect_ledgers(&mut collection)?;
        self.collect_cards(&mut collection)?;
        collection.tokens = load_json(&self.config.tokens_path());
        collection.cosmology = load_json(&self.config.cosmology_path());
        Ok(collection)
    }

    /// Pass 1: loose JSON node files, sorted by path.
    fn collect_node_files(&self, collection: &mut Collection) -> Result<(), CodexError> {
        for path in sorted_json_files(&self.config.nodes_dir())? {
            let Some(data) = load_json(&path) else {
                continue;
            };
            self.ingest_fragment(&mut collection.nodes, data, &path.display().to_string())?;
        }
        Ok(())
    }

    /// Pass 2: fixed ordered ledger list; blocks attribute provenance to the
    /// ledger path, not an internal block offset.
    fn collect_ledgers(&self, collection: &mut Collection) -> Result<(), CodexError> {
        for ledger in &self.config.ledgers {
            let Ok(text) = fs::read_to_string(ledger) else {
                continue;
            };
            for block in extract_json_blocks(&text) {
                self.ingest_fragment(&mut collection.nodes, block, &ledger.display().to_string())?;
            }
        }
        Ok(())
    }

    /// Pass 3: card files, sorted by path, appended unconditionally.
    fn collect_cards(&self, collection: &mut Collection) -> Result<(), CodexError> {
        for path in sorted_json_files(&self.config.cards_dir())? {
            if let Some(card) = load_json(&path) {
                collection.cards.push(card);
            }
        }
        Ok(())
    }

    /// Annotate → validate → merge one fragment. A fragment with a missing
    /// or empty id is skipped; anything else that fails the schema contract
    /// aborts the run.
    fn ingest_fragment(
        &self,
        nodes: &mut NodeSet,
        fragment: Value,
        source: &str,
    ) -> Result<(), CodexError> {
        let absent = match fragment.get("id") {
            None | Some(Value::Null) => true,
            Some(Value::String(id)) => id.is_empty(),
            Some(_) => false,
        };
        if absent || !fragment.is_object() {
            return Ok(());
        }
        let node = annotate(&fragment, source, self.stamp);
        self.validator.validate(&node, source)?;
        // Validation guarantees a string id from here on.
        let id = node["id"].as_str().unwrap_or_default().to_string();
        nodes.insert_or_merge(&id, node);
        Ok(())
    }
}

/// Read JSON from `path`; any failure means the file does not contribute.
fn load_json(path: &Path) -> Option<Value> {
    let text = fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

/// `*.json` entries of `dir`, sorted by path. A missing directory is an
/// empty tree, not an error.
fn sorted_json_files(dir: &Path) -> Result<Vec<PathBuf>, CodexError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}
