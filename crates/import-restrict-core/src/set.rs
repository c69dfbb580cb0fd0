//! Ordered restriction list with first-match-wins lookup.

use tracing::{debug, trace};

use crate::importee::Importee;
use crate::pattern_spec::PatternSpec;
use crate::restriction::{PatternError, Restriction};

/// Errors building a [`RestrictionSet`] from configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum BuildError {
    /// A pattern failed to compile.
    #[error("restricted[{restriction}].{source}")]
    #[diagnostic(
        code(import_restrict::config::invalid_pattern),
        help("fix the pattern syntax; see the glob dialect documentation")
    )]
    InvalidPattern {
        /// Position of the restriction in configuration order.
        restriction: usize,
        /// The underlying pattern error.
        #[source]
        source: PatternError,
    },
}

/// The restrictions of one analysis pass, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestrictionSet {
    restrictions: Vec<Restriction>,
}

impl RestrictionSet {
    /// Compiles every definition eagerly.
    ///
    /// # Errors
    ///
    /// Returns the first invalid pattern, with its position.
    pub fn build<I>(specs: I) -> Result<Self, BuildError>
    where
        I: IntoIterator,
        I::Item: Into<PatternSpec>,
    {
        let restrictions = specs
            .into_iter()
            .enumerate()
            .map(|(restriction, spec)| {
                let spec: PatternSpec = spec.into();
                Restriction::new(&spec.names, spec.message).map_err(|source| {
                    BuildError::InvalidPattern {
                        restriction,
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Built restriction set with {} restriction(s)", restrictions.len());
        Ok(Self { restrictions })
    }

    /// Returns the first restriction that disallows the importee.
    #[must_use]
    pub fn find_violation<N>(&self, importee: &Importee<N>) -> Option<&Restriction> {
        self.find_violation_index(importee).map(|(_, r)| r)
    }

    /// Like [`find_violation`](Self::find_violation), with the restriction's position.
    #[must_use]
    pub fn find_violation_index<N>(&self, importee: &Importee<N>) -> Option<(usize, &Restriction)> {
        let found = self
            .restrictions
            .iter()
            .enumerate()
            .find(|(_, r)| r.matches(importee));
        trace!(
            importee = %importee.name,
            restriction = ?found.map(|(i, _)| i),
            "Checked importee"
        );
        found
    }

    /// Returns the restrictions in configuration order.
    #[must_use]
    pub fn restrictions(&self) -> &[Restriction] {
        &self.restrictions
    }

    /// Returns the number of restrictions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.restrictions.len()
    }

    /// Returns true if there are no restrictions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glob::GlobError;

    fn named(name: &str) -> Importee<()> {
        Importee::new(name, ())
    }

    #[test]
    fn empty_set_finds_nothing() {
        let set = RestrictionSet::build(Vec::<PatternSpec>::new()).unwrap();
        assert!(set.is_empty());
        assert!(set.find_violation(&named("fs")).is_none());
        assert!(set.find_violation(&named("")).is_none());
    }

    #[test]
    fn string_shorthand_builds_single_pattern() {
        let set = RestrictionSet::build(["fs"]).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.restrictions()[0].patterns()[0].as_str(), "fs");
        assert!(set.find_violation(&named("fs")).is_some());
    }

    #[test]
    fn first_match_wins() {
        let set = RestrictionSet::build([
            PatternSpec::new(["fs*"], Some("first".to_string())),
            PatternSpec::new(["fs"], Some("second".to_string())),
        ])
        .unwrap();

        let (index, restriction) = set.find_violation_index(&named("fs")).unwrap();
        assert_eq!(index, 0);
        assert_eq!(restriction.message(), Some("first"));
    }

    #[test]
    fn skips_non_matching_restrictions() {
        let set = RestrictionSet::build([
            PatternSpec::new(["path"], None),
            PatternSpec::new(["fs"], Some("second".to_string())),
        ])
        .unwrap();

        let (index, _) = set.find_violation_index(&named("fs")).unwrap();
        assert_eq!(index, 1);
        assert!(set.find_violation(&named("os")).is_none());
    }

    #[test]
    fn lookup_is_idempotent() {
        let set = RestrictionSet::build(["a*", "b"]).unwrap();
        let importee = named("abc");
        let first = set.find_violation_index(&importee).map(|(i, _)| i);
        let second = set.find_violation_index(&importee).map(|(i, _)| i);
        assert_eq!(first, second);
        assert_eq!(first, Some(0));
    }

    #[test]
    fn build_fails_fast_with_position() {
        let err = RestrictionSet::build([
            PatternSpec::new(["fs"], None),
            PatternSpec::new(["ok", "@(bad"], None),
        ])
        .unwrap_err();

        let BuildError::InvalidPattern {
            restriction,
            source,
        } = &err;
        assert_eq!(*restriction, 1);
        assert_eq!(source.index, 1);
        assert_eq!(source.source, GlobError::UnclosedGroup);
        assert_eq!(
            err.to_string(),
            "restricted[1].name[1]: invalid glob pattern `@(bad`: unclosed extglob group"
        );
    }

    #[test]
    fn build_is_deterministic() {
        let specs = [PatternSpec::new(["/etc/**", "!/etc/hosts"], None)];
        assert_eq!(
            RestrictionSet::build(specs.clone()).unwrap(),
            RestrictionSet::build(specs).unwrap()
        );
    }

    #[test]
    fn set_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RestrictionSet>();
    }
}
