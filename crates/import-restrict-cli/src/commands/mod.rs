//! Subcommand implementations.

pub mod check;
pub mod explain;
pub mod init;
pub mod list;
pub mod output;

use anyhow::{Context, Result};
use import_restrict_core::Config;
use std::path::Path;

use crate::config_resolver::{self, ConfigSource};

/// Resolves and loads the configuration for the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let source = config_resolver::resolve(Path::new("."), explicit);
    load_from_source(&source)
}

fn load_from_source(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if other.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn default_source_yields_empty_config() {
        let config = load_from_source(&ConfigSource::Default).unwrap();
        assert!(config.restricted.is_empty());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let source = ConfigSource::Explicit(PathBuf::from("/nonexistent/import-restrict.toml"));
        let err = load_from_source(&source).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config"));
    }

    #[test]
    fn project_file_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("import-restrict.toml");
        std::fs::write(&path, r#"restricted = ["fs"]"#).unwrap();

        let config = load_from_source(&ConfigSource::Project(path)).unwrap();
        assert_eq!(config.restricted.len(), 1);
    }
}
