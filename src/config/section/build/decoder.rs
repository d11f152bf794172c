//! `[build.decoder]` decoder filename reversion configuration.
//!
//! `targets` are relative to the output directory. A directory target means
//! every `.js` file directly inside it; a file target is used as is.
//!
//! # Example
//!
//! ```toml
//! [build.decoder]
//! enable = true
//! targets = ["static"]
//! ```

use crate::{config::ConfigDiagnostics, utils::path::is_contained};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub enable: bool,
    pub targets: Vec<PathBuf>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            enable: true,
            targets: vec!["static".into()],
        }
    }
}

impl DecoderConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for target in &self.targets {
            if !is_contained(target) {
                diag.error(
                    "build.decoder.targets",
                    format!("`{}` must be a relative path inside build.output", target.display()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_decoder_defaults() {
        let config = test_parse_config("");
        assert!(config.build.decoder.enable);
        assert_eq!(config.build.decoder.targets, vec![PathBuf::from("static")]);
    }

    #[test]
    fn test_decoder_absolute_target_rejected() {
        let config = test_parse_config("[build.decoder]\ntargets = [\"/etc\"]");
        let mut diag = ConfigDiagnostics::new();
        config.build.decoder.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
    }
}
