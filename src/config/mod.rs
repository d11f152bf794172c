//! Pipeline configuration management for `theu.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build/     # [build] and sub-sections
//! │   └── serve      # [serve]
//! ├── types/         # ConfigError, ConfigDiagnostics
//! └── mod.rs         # Config (this file)
//! ```
//!
//! The config file is optional: without one, every section uses its
//! defaults and the current directory is the project root.

pub mod section;
pub mod types;

pub use section::build::{CompressConfig, DecoderConfig, ScriptRef};
use section::{BuildSectionConfig, ServeConfig};
pub use types::{ConfigDiagnostics, ConfigError};

use crate::{
    cli::{Cli, Commands, FinishArgs, ServeArgs},
    debug, log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing theu.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory (cwd when no file exists).
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (mut config, config_path) = match find_config_file(&cwd, &cli.config) {
            Some(path) => (Self::from_path(&path)?, path),
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                (Self::default(), cwd.join(&cli.config))
            }
        };

        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);

        config.config_path = config_path;
        config.finalize(cli, &root);
        config.validate()?;
        debug!("config"; "loaded {}", config.config_path.display());

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        // Builds run unattended, so unknown fields warn instead of prompting
        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {}, ignoring:", path.display());
            for field in &ignored {
                eprintln!("- {field}");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Finalize configuration after loading.
    fn finalize(&mut self, cli: &Cli, root: &Path) {
        crate::logger::set_verbose(cli.verbose);

        if let Some(output) = &cli.output {
            self.build.output = output.clone();
        }
        self.normalize_paths(root);
        self.apply_command_options(cli);
    }

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);

        self.build.output = normalize_path(&root.join(&self.build.output));
        self.build.scratch = normalize_path(&root.join(&self.build.scratch));
        self.build.metadata = normalize_path(&root.join(&self.build.metadata));
        self.config_path = normalize_path(&self.config_path);
        self.root = root;
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Stamp => {}
            Commands::Finish { finish_args, .. } => self.apply_finish_args(finish_args),
            Commands::Build {
                finish_args,
                keep_output,
            } => {
                self.apply_finish_args(finish_args);
                self.build.clean = !keep_output;
            }
            Commands::Serve { serve_args } => self.apply_serve_args(serve_args),
        }
    }

    fn apply_finish_args(&mut self, args: &FinishArgs) {
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        if args.no_compress {
            self.build.compress.enable = false;
        }
        self.apply_serve_args(&args.serve_args);
    }

    fn apply_serve_args(&mut self, args: &ServeArgs) {
        Self::update_option(&mut self.serve.interface, args.interface.as_ref());
        Self::update_option(&mut self.serve.port, args.port.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting all errors before failing.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        self.build.validate(&mut diag);
        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Find config file by searching upward from `start`.
///
/// An absolute `config_name` is only checked as is.
fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("[build\noutput = \"dist\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.config_path, PathBuf::new());
        assert!(config.build.minify);
        assert_eq!(config.serve.port, 8080);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[build]\noutput = \"dist\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = Config::parse_with_ignored(content).unwrap();

        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_find_config_file_upward() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("theu.toml"), "").unwrap();
        let nested = dir.path().join("src/components");
        fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested, Path::new("theu.toml")).unwrap();
        assert_eq!(found, dir.path().join("theu.toml"));
    }

    #[test]
    fn test_find_config_file_missing() {
        let dir = TempDir::new().unwrap();
        assert!(find_config_file(dir.path(), Path::new("no-such-config.toml")).is_none());
    }

    #[test]
    fn test_finalize_applies_cli_and_normalizes() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from([
            "theu", "build", "--minify", "false", "--no-compress", "--no-serve", "-p", "9001",
            "-o", "public",
        ]);

        let mut config = test_parse_config("[build]\nscratch = \"tmp/state\"");
        config.finalize(&cli, dir.path());

        assert!(!config.build.minify);
        assert!(!config.build.compress.enable);
        assert!(config.build.clean);
        assert_eq!(config.serve.port, 9001);
        assert!(config.build.output.is_absolute());
        assert!(config.build.output.ends_with("public"));
        assert!(config.build.scratch.ends_with("tmp/state"));
        assert!(config.build.metadata.ends_with("src/metadata.json"));
    }

    #[test]
    fn test_keep_output_disables_clean() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from(["theu", "build", "--keep-output"]);
        let mut config = Config::default();
        config.finalize(&cli, dir.path());
        assert!(!config.build.clean);
    }
}
