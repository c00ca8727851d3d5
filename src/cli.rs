//! CLI struct definitions for the codexc command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "codexc",
    version = env!("CARGO_PKG_VERSION"),
    about = "Deterministic batch compiler for the codex content corpus: gathers scattered node fragments, merges them append-only with provenance, and emits consolidated build artifacts."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
pub struct CompileCli {
    /// Root of the staged source tree (defaults to the current directory).
    #[clap(long)]
    pub root: Option<PathBuf>,
    /// Output directory override (defaults to `<root>/dist`).
    #[clap(long)]
    pub out: Option<PathBuf>,
    /// Suppress the summary line.
    #[clap(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile codex artifacts from staged sources
    #[clap(name = "compile", visible_alias = "c")]
    Compile(CompileCli),

    /// Print the embedded node schema document
    #[clap(name = "schema")]
    Schema,

    /// Show version information
    #[clap(name = "version")]
    Version,
}
