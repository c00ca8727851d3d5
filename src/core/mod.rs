//! Compiler subsystems: configuration, validation, extraction, provenance,
//! merge, collection, and artifact emission.

pub mod assets;
pub mod collect;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod merge;
pub mod provenance;
pub mod schema;
pub mod time;
