//! Configuration types for import-restrict.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::pattern_spec::{PatternSpec, RestrictionEntry};
use crate::set::{BuildError, RestrictionSet};
use crate::types::Severity;

/// Top-level configuration.
///
/// ```toml
/// severity = "error"
/// restricted = [
///     "child_process",
///     { name = "fs", message = "use the async API" },
///     { name = ["lodash/*", "!lodash/fp"] },
/// ]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Severity assigned to every violation (default: "error").
    #[serde(default)]
    pub severity: Severity,

    /// Restriction definitions, in priority order.
    #[serde(default)]
    pub restricted: Vec<RestrictionEntry>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Parses the JSON option array form (`[ "fs", { "name": ... } ]`).
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or not an array of entries.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let restricted: Vec<RestrictionEntry> =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                message: e.to_string(),
            })?;
        Ok(Self {
            severity: Severity::default(),
            restricted,
        })
    }

    /// Returns the normalized restriction definitions.
    #[must_use]
    pub fn pattern_specs(&self) -> Vec<PatternSpec> {
        self.restricted.iter().map(PatternSpec::from).collect()
    }

    /// Compiles the configured restrictions.
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is invalid.
    pub fn restriction_set(&self) -> Result<RestrictionSet, BuildError> {
        RestrictionSet::build(&self.restricted)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(import_restrict::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(
        code(import_restrict::config::parse),
        help("each `restricted` entry is a string or {{ name = ..., message = ... }}")
    )]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A restriction failed to compile.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importee::Importee;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.severity, Severity::Error);
        assert!(config.restricted.is_empty());
        assert!(config.restriction_set().unwrap().is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
severity = "warning"
restricted = [
    "child_process",
    { name = "fs", message = "use the async API" },
    { name = ["lodash/*", "!lodash/fp"] },
]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.severity, Severity::Warning);
        assert_eq!(config.restricted.len(), 3);

        let specs = config.pattern_specs();
        assert_eq!(specs[1].message.as_deref(), Some("use the async API"));
        assert_eq!(specs[2].names.len(), 2);

        let set = config.restriction_set().unwrap();
        assert!(set.find_violation(&Importee::new("lodash/map", ())).is_some());
        assert!(set.find_violation(&Importee::new("lodash/fp", ())).is_none());
    }

    #[test]
    fn test_parse_rejects_unknown_severity() {
        let result = Config::parse(r#"severity = "critical""#);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_parse_rejects_bad_entry() {
        let result = Config::parse("restricted = [42]");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_from_json_array() {
        let config =
            Config::from_json(r#"[{ "name": "fs", "message": "use the async API" }, "child_process"]"#)
                .unwrap();
        assert_eq!(config.severity, Severity::Error);
        assert_eq!(config.restricted.len(), 2);
    }

    #[test]
    fn test_invalid_pattern_surfaces_as_build_error() {
        let config = Config::parse(r#"restricted = ["ok", { name = ["[bad"] }]"#).unwrap();
        let err = ConfigError::from(config.restriction_set().unwrap_err());
        assert_eq!(
            err.to_string(),
            "restricted[1].name[0]: invalid glob pattern `[bad`: unclosed character class"
        );
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/import-restrict.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
