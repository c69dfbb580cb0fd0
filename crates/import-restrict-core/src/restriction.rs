//! A single restriction: an ordered pattern list plus an optional message.

use crate::glob::GlobError;
use crate::importee::Importee;
use crate::pattern::CompiledPattern;

/// Error compiling one of a restriction's patterns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("name[{index}]: invalid glob pattern `{pattern}`: {source}")]
#[diagnostic(code(import_restrict::pattern))]
pub struct PatternError {
    /// Position of the pattern within the restriction's names.
    pub index: usize,
    /// The pattern as written.
    pub pattern: String,
    /// Why it failed to compile.
    #[source]
    #[diagnostic_source]
    pub source: GlobError,
}

/// A restriction built from one or more patterns.
///
/// Immutable after construction and safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    patterns: Vec<CompiledPattern>,
    message: Option<String>,
}

impl Restriction {
    /// Compiles every pattern eagerly.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn new<I, S>(names: I, message: Option<String>) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let name = name.as_ref();
                CompiledPattern::compile(name).map_err(|source| PatternError {
                    index,
                    pattern: name.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            message: message.filter(|m| !m.is_empty()),
        })
    }

    /// Returns the compiled patterns in declaration order.
    #[must_use]
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Returns the raw custom message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the message suffix: `" {message}"`, or `""` when unset.
    #[must_use]
    pub fn custom_message(&self) -> String {
        self.message
            .as_ref()
            .map_or_else(String::new, |m| format!(" {m}"))
    }

    /// Tests whether the importee is disallowed by this restriction.
    #[must_use]
    pub fn matches<N>(&self, importee: &Importee<N>) -> bool {
        fold_restriction(&self.patterns, importee)
    }

    /// Records the fold step by step, for explaining a decision.
    #[must_use]
    pub fn trace<N>(&self, importee: &Importee<N>) -> Vec<FoldStep<'_>> {
        let mut matched = false;
        self.patterns
            .iter()
            .map(|pattern| {
                let hit = pattern.matches(importee);
                matched = step(matched, pattern, hit);
                FoldStep {
                    pattern,
                    hit,
                    matched,
                }
            })
            .collect()
    }
}

/// One step of [`Restriction::trace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldStep<'a> {
    /// The pattern evaluated at this step.
    pub pattern: &'a CompiledPattern,
    /// Whether its glob matched the importee.
    pub hit: bool,
    /// The accumulated result after this step.
    pub matched: bool,
}

/// Left fold over the pattern list, seeded with `false`.
///
/// A positive pattern ORs its result in; a negated pattern ANDs in the
/// inverse of its result. Order matters: a negation only suppresses a match
/// already accumulated, so a leading negation has no effect.
pub fn fold_restriction<N>(patterns: &[CompiledPattern], importee: &Importee<N>) -> bool {
    patterns.iter().fold(false, |matched, pattern| {
        step(matched, pattern, pattern.matches(importee))
    })
}

fn step(matched: bool, pattern: &CompiledPattern, hit: bool) -> bool {
    if pattern.is_negated() {
        matched && !hit
    } else {
        matched || hit
    }
}
