//! `[build.bundler]` configuration.
//!
//! The module bundler runs between stamping and finishing in `theu build`.
//! Arguments support `$THEU_*` variable substitution and the process gets
//! the same variables in its environment, so a bundler config can read
//! `process.env.THEU_BUILD_ID` for its output file names.
//!
//! # Example
//!
//! ```toml
//! [build.bundler]
//! command = ["npx", "rollup", "-c", "--environment", "BUILD:production"]
//! quiet = false
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};

/// Bundler invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundlerConfig {
    /// Display name for logging (defaults to command[0]).
    pub name: Option<String>,

    /// Command and arguments to execute.
    pub command: Vec<String>,

    /// Suppress output (default: false).
    pub quiet: bool,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            name: None,
            command: vec!["npx".into(), "rollup".into(), "-c".into()],
            quiet: false,
        }
    }
}

impl BundlerConfig {
    /// Get the display name for this command.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| self.command.first().map(String::as_str).unwrap_or("bundler"))
    }

    /// Only `theu build` needs the bundler, so a missing program is a warning here.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        super::check_installed("build.bundler.command", &self.command, false, diag);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_bundler_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.bundler.command, vec!["npx", "rollup", "-c"]);
        assert_eq!(config.build.bundler.display_name(), "npx");
        assert!(!config.build.bundler.quiet);
    }

    #[test]
    fn test_bundler_named() {
        let config = test_parse_config(
            r#"
[build.bundler]
name = "rollup"
command = ["node", "scripts/bundle.mjs"]
quiet = true
"#,
        );
        assert_eq!(config.build.bundler.display_name(), "rollup");
        assert_eq!(config.build.bundler.command, vec!["node", "scripts/bundle.mjs"]);
        assert!(config.build.bundler.quiet);
    }
}
