//! External command hooks.
//!
//! Builds the `$THEU_*` variables shared by the bundler and the asset tools,
//! and runs the bundler between stamping and finishing.

use crate::config::Config;
use crate::log;
use crate::utils::exec::Cmd;
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

// ============================================================================
// Environment Variables
// ============================================================================

/// Build `$THEU_*` variables for external commands.
pub fn build_theu_vars(config: &Config, build_id: &str) -> FxHashMap<String, String> {
    let mut vars = FxHashMap::default();

    vars.insert("THEU_BUILD_ID".into(), build_id.into());
    vars.insert(
        "THEU_OUTPUT_DIR".into(),
        config.build.output.display().to_string(),
    );
    vars.insert("THEU_ROOT".into(), config.get_root().display().to_string());
    vars.insert("THEU_MINIFY".into(), config.build.minify.to_string());

    vars
}

// ============================================================================
// Command Argument Resolution
// ============================================================================

/// Resolve `$THEU_*` variables in command arguments.
///
/// Replaces occurrences of `$THEU_XXX` with actual values from the vars map.
pub fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                result = result.replace(&format!("${key}"), value);
            }
            result
        })
        .collect()
}

// ============================================================================
// Bundler
// ============================================================================

/// Run the configured bundler. A non-zero exit aborts the build.
pub fn run_bundler(config: &Config, build_id: &str) -> Result<()> {
    let bundler = &config.build.bundler;
    if bundler.command.is_empty() {
        anyhow::bail!("build.bundler.command is empty");
    }

    let vars = build_theu_vars(config, build_id);
    let resolved = resolve_args(&bundler.command, &vars);

    if !bundler.quiet {
        log!("bundle"; "`{}` running", bundler.display_name());
    }

    let output = Cmd::from_slice(&resolved)
        .cwd(config.get_root())
        .envs(&vars)
        .pty(true)
        .quiet()
        .run()
        .with_context(|| format!("bundler `{}` failed", bundler.display_name()))?;

    // Print output directly without prefix (unless quiet)
    if !bundler.quiet {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if !stdout.is_empty() {
            println!("{stdout}");
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
