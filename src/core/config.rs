//! Source-tree layout configuration.
//!
//! Defaults mirror the staged corpus layout (`shared/` sources, `dist/`
//! artifacts). A `codex.toml` at the root may override any path; CLI flags
//! override the file.

use crate::core::error::CodexError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Resolved paths for one compiler run.
#[derive(Debug, Clone)]
pub struct CodexConfig {
    /// Root of the staged source tree.
    pub root: PathBuf,
    /// Directory holding node/card/token/cosmology sources.
    pub shared_dir: PathBuf,
    /// Directory receiving build artifacts.
    pub dist_dir: PathBuf,
    /// Fixed, ordered list of markdown ledger documents.
    pub ledgers: Vec<PathBuf>,
}

/// Optional `codex.toml` override file.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    paths: PathsSection,
}

#[derive(Debug, Deserialize, Default)]
struct PathsSection {
    shared: Option<PathBuf>,
    dist: Option<PathBuf>,
    ledgers: Option<Vec<PathBuf>>,
}

impl CodexConfig {
    /// Resolve configuration for `root`, honoring `<root>/codex.toml` when
    /// present.
    pub fn resolve(root: &Path) -> Result<Self, CodexError> {
        let file = load_config_file(root)?;
        let shared_dir = root.join(file.paths.shared.unwrap_or_else(|| PathBuf::from("shared")));
        let dist_dir = root.join(file.paths.dist.unwrap_or_else(|| PathBuf::from("dist")));
        let ledgers = match file.paths.ledgers {
            Some(list) => list.into_iter().map(|p| root.join(p)).collect(),
            None => vec![
                shared_dir.join("codex").join("Codex14499_archive.md"),
                shared_dir.join("codex").join("codex_temple_of_the_unbuilt.md"),
            ],
        };
        Ok(Self {
            root: root.to_path_buf(),
            shared_dir,
            dist_dir,
            ledgers,
        })
    }

    pub fn nodes_dir(&self) -> PathBuf {
        self.shared_dir.join("nodes")
    }

    pub fn cards_dir(&self) -> PathBuf {
        self.shared_dir.join("liber")
    }

    pub fn tokens_path(&self) -> PathBuf {
        self.shared_dir.join("stone").join("perm-style.json")
    }

    pub fn cosmology_path(&self) -> PathBuf {
        self.shared_dir.join("cosmo").join("codex.144_99.json")
    }

    /// `dist/c99/tokens/perm-style.json`, the nested token artifact path.
    pub fn tokens_artifact_path(&self) -> PathBuf {
        self.dist_dir
            .join("c99")
            .join("tokens")
            .join("perm-style.json")
    }
}

fn load_config_file(root: &Path) -> Result<ConfigFile, CodexError> {
    let path = root.join("codex.toml");
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let text = std::fs::read_to_string(&path)?;
    toml::from_str(&text)
        .map_err(|e| CodexError::ConfigError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_mirror_staged_layout() {
        let tmp = tempdir().expect("tempdir");
        let config = CodexConfig::resolve(tmp.path()).expect("resolve");
        assert_eq!(config.shared_dir, tmp.path().join("shared"));
        assert_eq!(config.dist_dir, tmp.path().join("dist"));
        assert_eq!(config.ledgers.len(), 2);
        assert!(config.nodes_dir().ends_with("shared/nodes"));
        assert!(config.tokens_artifact_path().ends_with("c99/tokens/perm-style.json"));
    }

    #[test]
    fn codex_toml_overrides_paths() {
        let tmp = tempdir().expect("tempdir");
        fs::write(
            tmp.path().join("codex.toml"),
            "[paths]\nshared = \"staging\"\ndist = \"out\"\nledgers = [\"staging/ledger.md\"]\n",
        )
        .expect("write config");
        let config = CodexConfig::resolve(tmp.path()).expect("resolve");
        assert_eq!(config.shared_dir, tmp.path().join("staging"));
        assert_eq!(config.dist_dir, tmp.path().join("out"));
        assert_eq!(config.ledgers, vec![tmp.path().join("staging/ledger.md")]);
    }

    #[test]
    fn malformed_codex_toml_is_a_config_error() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("codex.toml"), "[paths\n").expect("write config");
        let err = CodexConfig::resolve(tmp.path()).unwrap_err();
        assert!(matches!(err, CodexError::ConfigError(_)));
    }
}
