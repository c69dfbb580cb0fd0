//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# import-restrict configuration

# Severity of every reported importee: "error", "warning" or "info"
severity = "error"

# Restrictions, checked in order; the first one that matches is reported.
#
# An entry is a pattern string, or a table with `name` (one pattern or a
# list) and an optional `message` appended to the diagnostic.
#
# Patterns are globs matched against the importee name as written.
# Absolute patterns (`/...`, `C:\...`) are matched against the resolved
# file path instead. A leading `!` excludes what earlier patterns matched.
restricted = [
    { name = "child_process", message = "spawn processes through src/proc instead" },
    # { name = ["lodash/*", "!lodash/fp"], message = "import from lodash-es" },
    # { name = "/opt/legacy/**" },
]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("import-restrict.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created import-restrict.toml");
    println!("\nNext steps:");
    println!("  1. Edit import-restrict.toml to configure restrictions");
    println!("  2. Run: import-restrict check importees.json");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use import_restrict_core::{Config, Importee};

    #[test]
    fn default_config_is_valid() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        let set = config.restriction_set().unwrap();
        assert_eq!(set.len(), 1);
        assert!(set
            .find_violation(&Importee::new("child_process", ()))
            .is_some());
    }
}
