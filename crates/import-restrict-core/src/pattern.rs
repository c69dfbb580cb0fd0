//! Compiled restriction patterns.

use std::borrow::Cow;

use crate::glob::{GlobError, GlobMatcher};
use crate::importee::Importee;

/// One compiled pattern of a [`Restriction`](crate::Restriction).
///
/// A leading `!` negates the pattern unless it opens an extglob group
/// (`!(`). Only one `!` is consumed; any further ones invert the glob, so
/// `!!a` excepts every name but `a`. Absolute patterns are tested against
/// the importee's resolved file path; all others against its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    raw: String,
    negated: bool,
    matches_absolute_paths: bool,
    glob: GlobMatcher,
}

impl CompiledPattern {
    /// Compiles a raw pattern string.
    ///
    /// # Errors
    ///
    /// Returns an error if the glob part is empty or invalid.
    pub fn compile(raw: &str) -> Result<Self, GlobError> {
        let negated = raw.starts_with('!') && !raw[1..].starts_with('(');
        let pattern = if negated { &raw[1..] } else { raw };
        let matches_absolute_paths = is_absolute_pattern(pattern);
        let glob = GlobMatcher::new(&to_posix(pattern))?;

        Ok(Self {
            raw: raw.to_string(),
            negated,
            matches_absolute_paths,
            glob,
        })
    }

    /// Returns the pattern as written, including any `!` prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns true if this pattern carves exceptions out of a match.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns true if this pattern targets resolved file paths.
    #[must_use]
    pub fn matches_absolute_paths(&self) -> bool {
        self.matches_absolute_paths
    }

    /// Tests the glob against the importee, ignoring negation.
    ///
    /// Absolute patterns never match an importee without a file path.
    #[must_use]
    pub fn matches<N>(&self, importee: &Importee<N>) -> bool {
        if self.matches_absolute_paths {
            return importee
                .file_path()
                .is_some_and(|path| self.glob.is_match(&to_posix(path)));
        }
        self.glob.is_match(&importee.name)
    }
}

impl std::fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Returns true for POSIX roots (`/x`), UNC-style roots (`\x`) and drive
/// roots (`C:\x`, `c:/x`), on every platform.
fn is_absolute_pattern(pattern: &str) -> bool {
    let bytes = pattern.as_bytes();
    match bytes {
        [b'/' | b'\\', ..] => true,
        [drive, b':', b'/' | b'\\', ..] => drive.is_ascii_alphabetic(),
        _ => false,
    }
}

fn to_posix(s: &str) -> Cow<'_, str> {
    if s.contains('\\') {
        Cow::Owned(s.replace('\\', "/"))
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> CompiledPattern {
        CompiledPattern::compile(raw).unwrap()
    }

    #[test]
    fn bang_prefix_negates() {
        let p = pattern("!fs");
        assert!(p.is_negated());
        assert_eq!(p.as_str(), "!fs");
        assert!(p.matches(&Importee::new("fs", ())));
    }

    #[test]
    fn bang_paren_is_extglob_not_negation() {
        let p = pattern("!(fs)");
        assert!(!p.is_negated());
        assert!(p.matches(&Importee::new("path", ())));
        assert!(!p.matches(&Importee::new("fs", ())));
    }

    #[test]
    fn lone_bang_is_empty() {
        assert_eq!(CompiledPattern::compile("!"), Err(GlobError::Empty));
        assert_eq!(CompiledPattern::compile("!!"), Err(GlobError::Empty));
    }

    #[test]
    fn double_bang_negates_an_inverted_glob() {
        let p = pattern("!!a");
        assert!(p.is_negated());
        assert!(!p.matches(&Importee::new("a", ())));
        assert!(p.matches(&Importee::new("b", ())));
    }

    #[test]
    fn absolute_detection() {
        assert!(pattern("/etc/secrets/*").matches_absolute_paths());
        assert!(pattern("!/etc/secrets/*").matches_absolute_paths());
        assert!(pattern("C:\\secrets\\*").matches_absolute_paths());
        assert!(pattern("c:/secrets/*").matches_absolute_paths());
        assert!(!pattern("secrets/*").matches_absolute_paths());
        assert!(!pattern("./secrets/*").matches_absolute_paths());
        assert!(!pattern("c:secrets").matches_absolute_paths());
    }

    #[test]
    fn absolute_pattern_uses_file_path_only() {
        let p = pattern("/etc/secrets/*");
        assert!(!p.matches(&Importee::new("/etc/secrets/x", ())));
        assert!(p.matches(&Importee::new("x", ()).with_file_path("/etc/secrets/x")));
    }

    #[test]
    fn relative_pattern_uses_name_only() {
        let p = pattern("lodash/*");
        assert!(p.matches(&Importee::new("lodash/map", ())));
        assert!(!p.matches(&Importee::new("x", ()).with_file_path("lodash/map")));
    }

    #[test]
    fn backslashes_normalized_on_both_sides() {
        let p = pattern("C:\\project\\secrets\\**");
        let importee = Importee::new("../secrets/key", ()).with_file_path("C:\\project\\secrets\\key.js");
        assert!(p.matches(&importee));
    }

    #[test]
    fn compilation_is_deterministic() {
        assert_eq!(pattern("!/a/{b,c}"), pattern("!/a/{b,c}"));
    }
}
