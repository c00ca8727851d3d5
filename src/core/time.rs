//! Shared timestamp and build-stamp helpers.
//!
//! A `BuildStamp` is captured once per run; every provenance entry and the
//! metadata artifact reuse the same frozen values, so a full compile is a
//! pure function of the source tree for a fixed stamp.

use chrono::{SecondsFormat, Utc};

/// Producer tag stamped into every provenance entry.
pub const COMPILER_TAG: &str = "codexc@v1";

/// Frozen per-run identity: wall clock and commit id.
#[derive(Debug, Clone)]
pub struct BuildStamp {
    /// ISO-8601 UTC timestamp with `Z` suffix.
    pub built_utc: String,
    /// Short commit id from the environment, empty when unset.
    pub commit: String,
}

impl BuildStamp {
    /// Capture the current clock and `GITHUB_SHA` from the environment.
    pub fn capture() -> Self {
        Self {
            built_utc: now_utc_iso(),
            commit: short_commit(),
        }
    }
}

/// Returns the current UTC time as RFC3339 with microseconds and `Z`.
pub fn now_utc_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `GITHUB_SHA` truncated to 12 characters, empty string when unset.
pub fn short_commit() -> String {
    std::env::var("GITHUB_SHA")
        .map(|sha| sha.chars().take(12).collect())
        .unwrap_or_default()
}
