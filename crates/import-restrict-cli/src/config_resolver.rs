//! Locating the restriction file for a run.
//!
//! A `--config` path is taken as given. Otherwise the working directory is
//! searched for `import-restrict.toml`, then `.import-restrict.toml`, and
//! finally the user-wide `config.toml` under the global directory. When none
//! exists the run proceeds with an empty restriction list, so every importee
//! passes.

use std::path::{Path, PathBuf};

/// Origin of the restriction file used for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path passed with `--config`.
    Explicit(PathBuf),
    /// File next to the code being checked.
    Project(PathBuf),
    /// User-wide file shared by every project.
    Global(PathBuf),
    /// No file; nothing is restricted.
    Default,
}

impl ConfigSource {
    /// Returns the file to read, or `None` for an empty restriction list.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` for the user-wide file.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

const PROJECT_FILES: &[&str] = &["import-restrict.toml", ".import-restrict.toml"];

const GLOBAL_FILE: &str = "config.toml";

/// Picks the restriction file for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with_global(project_dir, explicit, global_config_dir())
}

fn resolve_with_global(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // Existence of an explicit path is checked when it is read.
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.exists())
    {
        tracing::debug!(path = %found.display(), "Using project restrictions");
        return ConfigSource::Project(found);
    }

    if let Some(found) = global_dir
        .map(|dir| dir.join(GLOBAL_FILE))
        .filter(|candidate| candidate.exists())
    {
        tracing::debug!(path = %found.display(), "Using global restrictions");
        return ConfigSource::Global(found);
    }

    tracing::debug!("No restriction file found");
    ConfigSource::Default
}

/// Directory holding the user-wide restriction file.
///
/// `$IMPORT_RESTRICT_CONFIG_DIR` when set, else `~/.import-restrict/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("IMPORT_RESTRICT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".import-restrict"))
}
