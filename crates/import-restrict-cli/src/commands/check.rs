//! Check command implementation.

use anyhow::{Context, Result};
use import_restrict_core::{check_importees, Config, Importee, LintResult, Severity};
use std::io::Read;
use std::path::Path;

use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    input: &Path,
    format: OutputFormat,
    severity: Option<Severity>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let importees = parse_feed(&read_input(input)?)?;

    let result = check(&config, &importees, severity)?;

    super::output::print(&result, format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read importees from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read importees: {}", input.display()))
}

fn parse_feed(content: &str) -> Result<Vec<Importee>> {
    let importees: Vec<Importee> =
        serde_json::from_str(content).context("Importee feed must be a JSON array")?;
    if importees.is_empty() {
        tracing::warn!("Importee feed is empty");
    }
    Ok(importees)
}

fn check(config: &Config, importees: &[Importee], severity: Option<Severity>) -> Result<LintResult> {
    let set = config
        .restriction_set()
        .context("Failed to compile restrictions")?;
    let severity = severity.unwrap_or(config.severity);

    tracing::info!(
        "Checking {} importee(s) against {} restriction(s)",
        importees.len(),
        set.len()
    );

    Ok(check_importees(&set, importees, severity))
}
