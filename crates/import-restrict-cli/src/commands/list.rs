//! List command implementation.

use anyhow::{Context, Result};
use import_restrict_core::RestrictionSet;
use std::fmt::Write;
use std::path::Path;

/// Runs the list command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let set = config
        .restriction_set()
        .context("Failed to compile restrictions")?;

    print!("{}", render(&set));
    Ok(())
}

fn render(set: &RestrictionSet) -> String {
    let mut out = String::new();
    if set.is_empty() {
        out.push_str("No restrictions configured.\n");
        return out;
    }

    let _ = writeln!(out, "Configured restrictions (first match wins):\n");
    for (index, restriction) in set.restrictions().iter().enumerate() {
        let _ = writeln!(out, "#{index}");
        for pattern in restriction.patterns() {
            let target = if pattern.matches_absolute_paths() {
                "file path"
            } else {
                "name"
            };
            let marker = if pattern.is_negated() { "except" } else { "match" };
            let _ = writeln!(out, "  {marker:<7} {:<30} ({target})", pattern.as_str());
        }
        if let Some(message) = restriction.message() {
            let _ = writeln!(out, "  message: {message}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use import_restrict_core::PatternSpec;

    #[test]
    fn empty_set() {
        assert_eq!(
            render(&RestrictionSet::default()),
            "No restrictions configured.\n"
        );
    }

    #[test]
    fn lists_patterns_in_order() {
        let set = RestrictionSet::build([
            PatternSpec::new(["lodash/*", "!lodash/fp"], Some("use lodash-es".to_string())),
            PatternSpec::new(["/etc/**"], None),
        ])
        .unwrap();
        let out = render(&set);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[2], "#0");
        assert!(lines[3].starts_with("  match   lodash/*"));
        assert!(lines[3].ends_with("(name)"));
        assert!(lines[4].starts_with("  except  !lodash/fp"));
        assert_eq!(lines[5], "  message: use lodash-es");
        assert_eq!(lines[6], "#1");
        assert!(lines[7].ends_with("(file path)"));
    }
}
