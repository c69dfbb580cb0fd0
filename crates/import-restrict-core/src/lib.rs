//! # import-restrict-core
//!
//! Restriction matching for `import`/`require` targets.
//!
//! A restriction is an ordered list of glob patterns plus an optional
//! message. Patterns starting with `!` carve exceptions out of what earlier
//! patterns matched. Patterns that are absolute paths are matched against the
//! importee's resolved file path; all others against the name as written.
//!
//! - [`RestrictionSet`] compiles definitions and finds the first restriction
//!   that disallows an importee
//! - [`check_for_restriction`] reports every restricted importee to a
//!   [`ReportSink`]
//! - [`Config`] loads definitions from TOML or the JSON option array
//!
//! ## Example
//!
//! ```ignore
//! use import_restrict_core::{check_importees, Config, Importee, Location, Severity};
//!
//! let config = Config::parse(r#"restricted = [{ name = "fs", message = "use fs/promises" }]"#)?;
//! let set = config.restriction_set()?;
//!
//! let importees = vec![Importee::new("fs", Location::new("src/app.js", 3, 1))];
//! let result = check_importees(&set, &importees, Severity::Error);
//! for violation in &result.violations {
//!     print!("{}", violation.format());
//! }
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod importee;
mod pattern;
mod pattern_spec;
mod report;
mod restriction;
mod set;
mod types;

/// The glob dialect used by restriction patterns.
pub mod glob;

pub use config::{Config, ConfigError};
pub use glob::{GlobError, GlobMatcher};
pub use importee::Importee;
pub use pattern::CompiledPattern;
pub use pattern_spec::{OneOrMany, PatternSpec, RestrictionEntry};
pub use report::{
    check_for_restriction, check_importees, Report, ReportSink, ViolationSink, CODE, MESSAGE_ID,
};
pub use restriction::{fold_restriction, FoldStep, PatternError, Restriction};
pub use set::{BuildError, RestrictionSet};
pub use types::{LintResult, Location, Severity, Violation};
