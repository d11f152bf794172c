//! `[build.compress]` geometry compression configuration.
//!
//! Each model file found directly under `dir` (relative to the output
//! directory) is re-compressed in place. `$THEU_ASSET` in `command` is the
//! absolute path of the file; input and output are the same path.
//!
//! # Example
//!
//! ```toml
//! [build.compress]
//! enable = true
//! dir = "assets"
//! extensions = ["glb"]
//! command = ["gltf-pipeline", "-i", "$THEU_ASSET", "-o", "$THEU_ASSET", "-d", "--draco.compressionLevel", "10"]
//! timeout = 300
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Geometry compression settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressConfig {
    pub enable: bool,

    /// Asset directory, relative to `build.output`. Not scanned recursively.
    pub dir: PathBuf,

    /// File extensions (without dot, case-insensitive) to compress.
    pub extensions: Vec<String>,

    /// Compression command, run once per file.
    pub command: Vec<String>,

    /// Per-file timeout in seconds. A hung tool is killed after this.
    pub timeout: u64,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            enable: true,
            dir: "assets".into(),
            extensions: vec!["glb".into()],
            command: [
                "gltf-pipeline",
                "-i",
                "$THEU_ASSET",
                "-o",
                "$THEU_ASSET",
                "-d",
                "--draco.compressionLevel",
                "10",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            timeout: 300,
        }
    }
}

impl CompressConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Check whether `path` has one of the configured extensions.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Compression is an optimization, so a missing tool is only a warning.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        if self.timeout == 0 {
            diag.error("build.compress.timeout", "timeout must be at least 1 second");
        }
        if self.extensions.iter().any(|e| e.starts_with('.')) {
            diag.error_with_hint(
                "build.compress.extensions",
                "extensions must not start with a dot",
                "write `glb` instead of `.glb`",
            );
        }
        if !self.command.iter().any(|arg| arg.contains("$THEU_ASSET")) {
            diag.warn(
                "build.compress.command",
                "command never references $THEU_ASSET, every run will compress the same input",
            );
        }
        super::check_installed("build.compress.command", &self.command, false, diag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_compress_defaults() {
        let config = test_parse_config("");
        let compress = &config.build.compress;
        assert!(compress.enable);
        assert_eq!(compress.dir, Path::new("assets"));
        assert_eq!(compress.extensions, vec!["glb"]);
        assert_eq!(compress.command[0], "gltf-pipeline");
        assert_eq!(compress.timeout(), Duration::from_secs(300));
    }

    #[test]
    fn test_matches_extension_case_insensitive() {
        let compress = CompressConfig::default();
        assert!(compress.matches(Path::new("assets/scene.glb")));
        assert!(compress.matches(Path::new("assets/SCENE.GLB")));
        assert!(!compress.matches(Path::new("assets/texture.png")));
        assert!(!compress.matches(Path::new("assets/glb")));
    }

    #[test]
    fn test_validate_dot_extension() {
        let config = test_parse_config("[build.compress]\nextensions = [\".glb\"]");
        let mut diag = ConfigDiagnostics::new();
        config.build.compress.validate(&mut diag);
        assert!(
            diag.errors()
                .iter()
                .any(|e| e.field == "build.compress.extensions")
        );
    }

    #[test]
    fn test_validate_disabled_skips_checks() {
        let config = test_parse_config("[build.compress]\nenable = false\ntimeout = 0");
        let mut diag = ConfigDiagnostics::new();
        config.build.compress.validate(&mut diag);
        assert!(diag.errors().is_empty());
        assert!(diag.warnings().is_empty());
    }
}
