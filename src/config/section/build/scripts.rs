//! `[[build.scripts]]` script placeholder configuration.
//!
//! The bundler template references scripts by their unstamped names. Each
//! entry maps one of those references to the stamped, route-relative name.
//!
//! `target` supports two tokens:
//! - `{root}`: `./` at the site root, one `../` per nested route segment
//! - `{build_id}`: the current build identifier
//!
//! # Example
//!
//! ```toml
//! [[build.scripts]]
//! placeholder = "./static/main.js"
//! target = "{root}static/main.{build_id}.js"
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};

/// One script reference rewritten during page generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRef {
    /// Exact text in the template.
    pub placeholder: String,
    /// Replacement pattern.
    pub target: String,
}

impl ScriptRef {
    pub fn new(placeholder: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            target: target.into(),
        }
    }

    /// Expand `{root}` and `{build_id}` in the target.
    pub fn render(&self, root: &str, build_id: &str) -> String {
        self.target
            .replace("{root}", root)
            .replace("{build_id}", build_id)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.placeholder.is_empty() {
            diag.error("build.scripts.placeholder", "placeholder is empty");
        }
        if !self.target.contains("{build_id}") {
            diag.warn(
                "build.scripts.target",
                format!(
                    "`{}` has no {{build_id}} token, the script will not be cache-busted",
                    self.target
                ),
            );
        }
    }
}

/// Entry module and vendor chunk emitted by the bundler.
pub(super) fn default_scripts() -> Vec<ScriptRef> {
    vec![
        ScriptRef::new("./static/main.js", "{root}static/main.{build_id}.js"),
        ScriptRef::new("./static/vendor.js", "{root}static/vendor.{build_id}.js"),
    ]
}
