//! Embedded JSON extraction from markdown ledgers.
//!
//! Ledger documents mirror node definitions inside ```json fenced blocks.
//! A malformed block is documentation noise, not a compile failure, so it
//! is skipped without comment.

use regex::Regex;
use serde_json::Value;

/// Pull every well-formed JSON object out of ```json fenced blocks.
///
/// Ordering follows document order. Blocks that fail to parse, and blocks
/// whose payload is not an object, are dropped silently.
pub fn extract_json_blocks(text: &str) -> Vec<Value> {
    let fence = Regex::new(r"```json\s*(\{[\s\S]*?\})\s*```").unwrap();
    fence
        .captures_iter(text)
        .filter_map(|caps| {
            let raw = caps.get(1)?.as_str();
            serde_json::from_str::<Value>(raw).ok()
        })
        .filter(Value::is_object)
        .collect()
}
