//! codexc: deterministic artifact compiler for the codex content corpus.
//!
//! A corpus scatters node definitions across loose JSON files and markdown
//! ledgers. codexc discovers every fragment, stamps provenance, validates
//! the node contract, merges duplicates append-only, and emits consolidated
//! build artifacts.
//!
//! # Pipeline
//!
//! Each fragment flows Extractor → Annotator → Validator → Merge Engine;
//! the orchestrator owns the only piece of accumulating state and drives a
//! single linear pass:
//!
//! - **Nodes** (`shared/nodes/*.json`), sorted by path
//! - **Ledgers** (fixed ordered markdown list), ```json fenced blocks
//! - **Cards** (`shared/liber/*.json`), appended without identity
//! - **Tokens** and **cosmology** documents, passed through verbatim
//!
//! # Invariants
//!
//! - Exactly one current representation per node id; divergent content is
//!   archived under `versions`, deduplicated by canonical content hash
//! - `provenance.sources` and `versions` are append-only
//! - A node that fails the schema contract never reaches an artifact
//! - Reruns over an unchanged tree are byte-identical for a frozen stamp
//!
//! Malformed input files are skipped silently; a schema violation is the
//! one fatal condition.

pub mod cli;
pub mod core;

use crate::cli::{Cli, Command, CompileCli};
use crate::core::collect::Collector;
use crate::core::config::CodexConfig;
use crate::core::emit;
use crate::core::error::CodexError;
use crate::core::schema::NodeValidator;
use crate::core::time::BuildStamp;
use anyhow::Context;
use colored::Colorize;

/// Dispatch a parsed CLI invocation.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Compile(args) => compile_command(args),
        Command::Schema => {
            println!("{}", crate::core::assets::NODE_SCHEMA_JSON.trim_end());
            Ok(())
        }
        Command::Version => {
            println!("codexc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn compile_command(args: CompileCli) -> anyhow::Result<()> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("resolving current directory")?,
    };
    let mut config = CodexConfig::resolve(&root)
        .with_context(|| format!("loading configuration for {}", root.display()))?;
    if let Some(out) = args.out {
        config.dist_dir = out;
    }

    let stamp = BuildStamp::capture();
    let validator = NodeValidator::from_embedded();
    let summary = compile(&config, &validator, &stamp)?;

    if !args.quiet {
        println!("{}", summary.to_string().green());
    }
    Ok(())
}

/// Run the full collect + emit pipeline with explicit collaborators.
///
/// Exposed for tests and embedding: a caller supplying a fixed `stamp`
/// gets byte-identical artifacts across reruns of an unchanged tree.
pub fn compile(
    config: &CodexConfig,
    validator: &NodeValidator,
    stamp: &BuildStamp,
) -> Result<emit::BuildSummary, CodexError> {
    let collection = Collector::new(config, validator, stamp).collect()?;
    emit::write_artifacts(config, &collection, stamp)
}
