//! Restriction definitions as they appear in configuration.
//!
//! Each entry of the `restricted` option is either a bare pattern string or
//! an object with `name` (one pattern or a list) and an optional `message`.
//! Entries are normalized once into [`PatternSpec`] so matching never
//! branches on the configuration shape.

use serde::{Deserialize, Serialize};

/// One or many pattern strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single pattern.
    One(String),
    /// A pattern list, evaluated in order.
    Many(Vec<String>),
}

/// Raw configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RestrictionEntry {
    /// String shorthand, equivalent to `{ name = "..." }`.
    Name(String),
    /// Full form.
    Object {
        /// Pattern or patterns.
        name: OneOrMany,
        /// Custom message appended to the diagnostic.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

/// Normalized restriction definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    /// Patterns in declaration order.
    pub names: Vec<String>,
    /// Optional custom message.
    pub message: Option<String>,
}

impl PatternSpec {
    /// Creates a definition from patterns and an optional message.
    #[must_use]
    pub fn new<I, S>(names: I, message: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            message,
        }
    }
}

impl From<RestrictionEntry> for PatternSpec {
    fn from(entry: RestrictionEntry) -> Self {
        match entry {
            RestrictionEntry::Name(name) => Self::new([name], None),
            RestrictionEntry::Object { name, message } => {
                let names = match name {
                    OneOrMany::One(name) => vec![name],
                    OneOrMany::Many(names) => names,
                };
                Self { names, message }
            }
        }
    }
}

impl From<&RestrictionEntry> for PatternSpec {
    fn from(entry: &RestrictionEntry) -> Self {
        entry.clone().into()
    }
}

impl From<&str> for PatternSpec {
    fn from(name: &str) -> Self {
        Self::new([name], None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_mixed_json_array() {
        let json = r#"[
            "child_process",
            { "name": "fs", "message": "use the async API" },
            { "name": ["lodash/*", "!lodash/fp"] }
        ]"#;
        let entries: Vec<RestrictionEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], RestrictionEntry::Name("child_process".to_string()));

        let specs: Vec<PatternSpec> = entries.into_iter().map(PatternSpec::from).collect();
        assert_eq!(specs[0], PatternSpec::new(["child_process"], None));
        assert_eq!(
            specs[1],
            PatternSpec::new(["fs"], Some("use the async API".to_string()))
        );
        assert_eq!(specs[2].names, vec!["lodash/*", "!lodash/fp"]);
        assert!(specs[2].message.is_none());
    }

    #[test]
    fn object_without_name_rejected() {
        let result: Result<RestrictionEntry, _> = serde_json::from_str(r#"{ "message": "x" }"#);
        assert!(result.is_err());
    }
}
