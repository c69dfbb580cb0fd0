//! Importee records fed in by the analysis driver.

use serde::{Deserialize, Serialize};

use crate::types::Location;

/// A single import or require target encountered during analysis.
///
/// `N` is an opaque source-location token. The core never inspects it; it
/// is handed back unchanged in every [`Report`](crate::Report).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Importee<N = Location> {
    /// Module or path string as written in the source (e.g. `"fs"`, `"./lib/x"`).
    pub name: String,
    /// Resolved absolute file path, when the driver could resolve one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Source-location token forwarded to the report sink.
    #[serde(rename = "location", default)]
    pub node: N,
}

impl<N> Importee<N> {
    /// Creates an importee without a resolved file path.
    #[must_use]
    pub fn new(name: impl Into<String>, node: N) -> Self {
        Self {
            name: name.into(),
            file_path: None,
            node,
        }
    }

    /// Sets the resolved absolute file path.
    #[must_use]
    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    /// Returns the resolved file path, if any.
    #[must_use]
    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_feed_entry() {
        let json = r#"{
            "name": "fs",
            "filePath": "/node/fs.js",
            "location": { "file": "src/index.js", "line": 3, "column": 1 }
        }"#;
        let importee: Importee = serde_json::from_str(json).unwrap();
        assert_eq!(importee.name, "fs");
        assert_eq!(importee.file_path(), Some("/node/fs.js"));
        assert_eq!(importee.node.line, 3);
    }

    #[test]
    fn deserialize_minimal_entry() {
        let importee: Importee = serde_json::from_str(r#"{ "name": "path" }"#).unwrap();
        assert!(importee.file_path.is_none());
        assert_eq!(importee.node, Location::default());
    }

    #[test]
    fn builder_sets_file_path() {
        let importee = Importee::new("x", ()).with_file_path("/etc/secrets/x");
        assert_eq!(importee.file_path(), Some("/etc/secrets/x"));
    }
}
