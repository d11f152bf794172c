//! `[build]` section configuration.
//!
//! Paths of every pipeline input and output, plus the sub-sections for the
//! bundler, script placeholders, asset compression and decoder reversion.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"                 # Bundler output directory (relative to site root)
//! scratch = ".tmp"                # Scratch directory holding the build id
//! template = "index.html"         # Bundler-emitted template (relative to output)
//! metadata = "src/metadata.json"  # Route metadata table
//! minify = true                   # Minify generated HTML
//! home = "home"                   # Metadata page served at the site root
//!
//! [build.routes]                  # Optional, derived from the metadata table otherwise
//! "" = "home"
//! "the-veil" = "the-veil"
//! ```
//!
//! See submodules for detailed options: [`scripts`], [`compress`], [`decoder`], [`bundler`].

mod bundler;
mod compress;
mod decoder;
mod scripts;

pub use bundler::BundlerConfig;
pub use compress::CompressConfig;
pub use decoder::DecoderConfig;
pub use scripts::ScriptRef;

use crate::{config::ConfigDiagnostics, utils::path::is_contained};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Build output directory (shared with the bundler).
    pub output: PathBuf,

    /// Scratch directory for state shared between `stamp` and `finish`.
    pub scratch: PathBuf,

    /// Bundler-emitted HTML template, relative to `output`.
    pub template: PathBuf,

    /// Route metadata table (JSON).
    pub metadata: PathBuf,

    /// Minify generated HTML.
    pub minify: bool,

    /// Metadata page rendered at the site root when routes are derived.
    pub home: String,

    /// Explicit route -> metadata page mapping. Empty means derive from the table.
    pub routes: BTreeMap<String, String>,

    /// Clean output directory before bundling (`theu build` only).
    #[serde(skip)]
    pub clean: bool,

    /// Script placeholders rewritten to their stamped names.
    pub scripts: Vec<ScriptRef>,

    /// Bundler invocation for `theu build`.
    pub bundler: BundlerConfig,

    /// Geometry compression of model assets.
    pub compress: CompressConfig,

    /// Decoder filename reversion.
    pub decoder: DecoderConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            scratch: ".tmp".into(),
            template: "index.html".into(),
            metadata: "src/metadata.json".into(),
            minify: true,
            home: "home".into(),
            routes: BTreeMap::new(),
            clean: false,
            scripts: scripts::default_scripts(),
            bundler: BundlerConfig::default(),
            compress: CompressConfig::default(),
            decoder: DecoderConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    /// Absolute path of the bundler-emitted template.
    pub fn template_path(&self) -> PathBuf {
        self.output.join(&self.template)
    }

    /// Validate build configuration.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output == self.scratch {
            diag.error_with_hint(
                "build.scratch",
                "scratch directory is the output directory",
                "scratch is deleted after every build, pick a separate directory",
            );
        }
        if self.template.is_absolute() {
            diag.error("build.template", "template must be relative to build.output");
        }
        for route in self.routes.keys() {
            if !is_contained(Path::new(route)) {
                diag.error(
                    "build.routes",
                    format!("route `{route}` must be a relative path inside the output directory"),
                );
            }
        }

        for script in &self.scripts {
            script.validate(diag);
        }
        self.bundler.validate(diag);
        self.compress.validate(diag);
        self.decoder.validate(diag);
    }
}

/// Check that the program of `command` can be found, as an error or a warning.
pub(super) fn check_installed(
    field: &'static str,
    command: &[String],
    fatal: bool,
    diag: &mut ConfigDiagnostics,
) {
    let Some(cmd) = command.first() else {
        diag.error(field, "command is empty");
        return;
    };

    if which::which(cmd).is_ok() {
        return;
    }

    let message = format!("`{cmd}` not found");
    let hint = format!("install the command or update {field}");
    if fatal {
        diag.error_with_hint(field, message, hint);
    } else {
        diag.warn(field, format!("{message}, {hint}"));
    }
}
