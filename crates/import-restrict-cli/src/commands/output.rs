//! Shared output formatting for check results.

use anyhow::Result;
use import_restrict_core::{LintResult, Severity};

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    print!("{}", render_text(result));
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        out.push_str(&violation.format());
        out.push('\n');
    }

    let summary_color = if result.has_errors() {
        "\x1b[31m"
    } else if result.has_violations_at(Severity::Warning) {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    out.push_str(summary_color);
    out.push_str(&result.summary());
    out.push_str("\x1b[0m\n");
    out
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}
