//! Decoder filename reversion.
//!
//! A pre-build patch stamps the build id into the filenames the vendored
//! geometry decoder loads at runtime. The shipped decoder files keep their
//! stable names, so the three `_loadLibrary(...)` call sites are rewritten
//! back:
//!
//! ```text
//! _loadLibrary('draco_decoder.<uuid>.js', ...)      -> 'draco_decoder.js'
//! _loadLibrary('draco_wasm_wrapper.<uuid>.js', ...) -> 'draco_wasm_wrapper.js'
//! _loadLibrary('draco_decoder.<uuid>.wasm', ...)    -> 'draco_decoder.wasm'
//! ```
//!
//! Matches are anchored on the call, so the same filenames elsewhere in a
//! script are left alone. Reverted names no longer match, which makes the
//! rewrite idempotent.

use crate::config::DecoderConfig;
use crate::core::BuildError;
use crate::debug;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static LOAD_LIBRARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(_loadLibrary\(\s*)(['"])(draco_decoder|draco_wasm_wrapper)[.-][0-9a-fA-F]{8}(?:-[0-9a-fA-F]{4}){3}-[0-9a-fA-F]{12}\.(js|wasm)(['"])"#,
    )
    .unwrap()
});

/// Rewrite stamped decoder filenames in one script's source.
///
/// Borrows when nothing matched.
pub fn revert_source(source: &str) -> Cow<'_, str> {
    LOAD_LIBRARY.replace_all(source, |caps: &Captures| {
        let (open, close) = (&caps[2], &caps[5]);
        let known = matches!(
            (&caps[3], &caps[4]),
            ("draco_decoder", "js" | "wasm") | ("draco_wasm_wrapper", "js")
        );

        if open == close && known {
            format!("{}{open}{}.{}{close}", &caps[1], &caps[3], &caps[4])
        } else {
            caps[0].to_string()
        }
    })
}

/// Revert decoder filenames in every configured target under `output_dir`.
///
/// Returns the number of files rewritten. Files whose content does not
/// change are left untouched on disk.
pub fn revert_decoder_names(output_dir: &Path, config: &DecoderConfig) -> Result<usize, BuildError> {
    if !config.enable {
        return Ok(0);
    }

    let mut rewritten = 0;
    for file in collect_targets(output_dir, &config.targets)? {
        let source =
            fs::read_to_string(&file).map_err(|err| BuildError::Read(file.clone(), err))?;

        if let Cow::Owned(reverted) = revert_source(&source)
            && reverted != source
        {
            fs::write(&file, reverted).map_err(|err| BuildError::Write(file.clone(), err))?;
            debug!("decoder"; "reverted {}", file.display());
            rewritten += 1;
        }
    }

    Ok(rewritten)
}

/// Resolve targets to script files: a directory means its `.js` files
/// (not recursive), a file is taken as is.
fn collect_targets(output_dir: &Path, targets: &[PathBuf]) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();

    for target in targets {
        let path = output_dir.join(target);

        if path.is_dir() {
            let entries = fs::read_dir(&path).map_err(|err| BuildError::Read(path.clone(), err))?;
            let mut scripts: Vec<_> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "js"))
                .collect();
            scripts.sort();
            files.extend(scripts);
        } else if path.is_file() {
            files.push(path);
        } else {
            debug!("decoder"; "target {} not found, skipping", path.display());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    fn stamped() -> String {
        format!(
            "a._loadLibrary('draco_decoder.{ID}.js','text');\
             b._loadLibrary(\"draco_wasm_wrapper.{ID}.js\",'text');\
             c._loadLibrary( 'draco_decoder.{ID}.wasm','arraybuffer');"
        )
    }

    #[test]
    fn test_reverts_three_call_sites() {
        let stamped = stamped();
        let reverted = revert_source(&stamped);
        assert_eq!(
            reverted,
            "a._loadLibrary('draco_decoder.js','text');\
             b._loadLibrary(\"draco_wasm_wrapper.js\",'text');\
             c._loadLibrary( 'draco_decoder.wasm','arraybuffer');"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = revert_source(&stamped()).into_owned();
        let twice = revert_source(&once);
        assert!(matches!(twice, Cow::Borrowed(_)));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_only_anchored_call_sites() {
        let source = format!("const url = 'draco_decoder.{ID}.js'; loadFile('draco_decoder.{ID}.wasm');");
        assert_eq!(revert_source(&source), source);
    }

    #[test]
    fn test_hyphen_separator_and_unknown_pairs() {
        let source = format!("_loadLibrary('draco_decoder-{ID}.js')");
        assert_eq!(revert_source(&source), "_loadLibrary('draco_decoder.js')");

        // The wrapper is never a wasm binary
        let source = format!("_loadLibrary('draco_wasm_wrapper.{ID}.wasm')");
        assert_eq!(revert_source(&source), source);

        // Mismatched quotes are not a call site
        let source = format!("_loadLibrary('draco_decoder.{ID}.js\")");
        assert_eq!(revert_source(&source), source);
    }

    #[test]
    fn test_revert_decoder_names_on_disk() {
        let dir = TempDir::new().unwrap();
        let static_dir = dir.path().join("static");
        fs::create_dir_all(&static_dir).unwrap();
        fs::write(static_dir.join("vendor.abc.js"), stamped()).unwrap();
        fs::write(static_dir.join("main.abc.js"), "console.log(1)").unwrap();
        fs::write(static_dir.join("notes.txt"), stamped()).unwrap();

        let config = DecoderConfig::default();
        assert_eq!(revert_decoder_names(dir.path(), &config).unwrap(), 1);

        let vendor = fs::read_to_string(static_dir.join("vendor.abc.js")).unwrap();
        assert!(!vendor.contains(ID));
        // Only .js files in a directory target
        let notes = fs::read_to_string(static_dir.join("notes.txt")).unwrap();
        assert!(notes.contains(ID));

        // Second run finds nothing to do
        assert_eq!(revert_decoder_names(dir.path(), &config).unwrap(), 0);
    }

    #[test]
    fn test_file_target_and_missing_target() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("decoder.mjs"), stamped()).unwrap();

        let config = DecoderConfig {
            enable: true,
            targets: vec!["decoder.mjs".into(), "missing".into()],
        };
        assert_eq!(revert_decoder_names(dir.path(), &config).unwrap(), 1);
    }

    #[test]
    fn test_disabled() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), stamped()).unwrap();
        let config = DecoderConfig {
            enable: false,
            targets: vec!["a.js".into()],
        };
        assert_eq!(revert_decoder_names(dir.path(), &config).unwrap(), 0);
    }
}
