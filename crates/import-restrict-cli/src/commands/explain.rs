//! Explain command implementation.
//!
//! Walks the restrictions in order and prints each pattern's contribution
//! to the fold, stopping at the first restriction that matches.

use anyhow::{Context, Result};
use import_restrict_core::{Importee, Report, RestrictionSet};
use std::fmt::Write;
use std::path::Path;

/// Runs the explain command.
pub fn run(name: &str, file_path: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let set = config
        .restriction_set()
        .context("Failed to compile restrictions")?;

    let mut importee = Importee::new(name, ());
    if let Some(path) = file_path {
        importee = importee.with_file_path(path);
    }

    print!("{}", explain(&set, &importee));
    Ok(())
}

fn explain(set: &RestrictionSet, importee: &Importee<()>) -> String {
    let mut out = String::new();

    for (index, restriction) in set.restrictions().iter().enumerate() {
        let steps = restriction.trace(importee);
        let matched = steps.last().is_some_and(|s| s.matched);

        let _ = writeln!(out, "#{index}");
        for step in &steps {
            let hit = if step.hit { "hit " } else { "miss" };
            let _ = writeln!(
                out,
                "  {:<30} {hit} -> {}",
                step.pattern.as_str(),
                step.matched
            );
        }

        if matched {
            let report = Report {
                importee,
                restriction,
                index,
            };
            let _ = writeln!(out, "\n{}", report.render());
            return out;
        }
    }

    let _ = writeln!(out, "'{}' is not restricted.", importee.name);
    out
}
