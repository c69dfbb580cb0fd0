//! Reporting restricted importees.
//!
//! The core hands structured [`Report`]s to a [`ReportSink`]; sinks decide
//! how to present them. [`ViolationSink`] turns reports into
//! [`Violation`]s for the CLI and tests.

use crate::importee::Importee;
use crate::restriction::Restriction;
use crate::set::RestrictionSet;
use crate::types::{LintResult, Location, Severity, Violation};

/// Message id attached to every report.
pub const MESSAGE_ID: &str = "restricted";

/// Diagnostic code used in [`Violation::code`].
pub const CODE: &str = "IR001";

/// A restricted importee together with the restriction that matched.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a, N> {
    /// The offending importee.
    pub importee: &'a Importee<N>,
    /// The first restriction that matched it.
    pub restriction: &'a Restriction,
    /// Position of `restriction` in configuration order.
    pub index: usize,
}

impl<N> Report<'_, N> {
    /// Returns the message id (`"restricted"`).
    #[must_use]
    pub fn message_id(&self) -> &'static str {
        MESSAGE_ID
    }

    /// Returns the importee's location token.
    #[must_use]
    pub fn node(&self) -> &N {
        &self.importee.node
    }

    /// Returns the importee name as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.importee.name
    }

    /// Returns the custom message suffix (with leading space, or empty).
    #[must_use]
    pub fn custom_message(&self) -> String {
        self.restriction.custom_message()
    }

    /// Renders the user-facing message.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "'{}' module is restricted from being used.{}",
            self.name(),
            self.custom_message()
        )
    }
}

/// Receives one report per restricted importee.
pub trait ReportSink<N> {
    /// Handles a single report.
    fn report(&mut self, report: Report<'_, N>);
}

impl<N, F> ReportSink<N> for F
where
    F: FnMut(Report<'_, N>),
{
    fn report(&mut self, report: Report<'_, N>) {
        self(report);
    }
}

/// Collects reports as [`Violation`]s at a fixed severity.
#[derive(Debug, Default)]
pub struct ViolationSink {
    severity: Severity,
    violations: Vec<Violation>,
}

impl ViolationSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            violations: Vec::new(),
        }
    }

    /// Returns the collected violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl ReportSink<Location> for ViolationSink {
    fn report(&mut self, report: Report<'_, Location>) {
        self.violations.push(Violation {
            code: CODE.to_string(),
            rule: report.message_id().to_string(),
            severity: self.severity,
            location: report.node().clone(),
            message: report.render(),
            importee: report.name().to_string(),
            restriction: report.index,
        });
    }
}

/// Checks every importee and reports each restricted one, in feed order.
///
/// Returns the number of reports emitted.
pub fn check_for_restriction<'a, N, I, S>(
    restrictions: &RestrictionSet,
    importees: I,
    sink: &mut S,
) -> usize
where
    N: 'a,
    I: IntoIterator<Item = &'a Importee<N>>,
    S: ReportSink<N> + ?Sized,
{
    let mut reported = 0;
    for importee in importees {
        if let Some((index, restriction)) = restrictions.find_violation_index(importee) {
            sink.report(Report {
                importee,
                restriction,
                index,
            });
            reported += 1;
        }
    }
    reported
}

/// Checks a batch of located importees and collects a [`LintResult`].
#[must_use]
pub fn check_importees(
    restrictions: &RestrictionSet,
    importees: &[Importee<Location>],
    severity: Severity,
) -> LintResult {
    let mut sink = ViolationSink::new(severity);
    check_for_restriction(restrictions, importees, &mut sink);
    LintResult {
        violations: sink.into_violations(),
        importees_checked: importees.len(),
    }
}
