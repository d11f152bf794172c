//! Geometry compression of model assets.
//!
//! Every matching file directly under `<output>/<compress.dir>` is handed to
//! an [`AssetCompressor`]. A failure is recorded in the [`CompressReport`]
//! and the remaining files still run.

use crate::config::CompressConfig;
use crate::core::BuildError;
use crate::hooks::resolve_args;
use crate::logger::ProgressLine;
use crate::utils::exec::Cmd;
use crate::{debug, log};
use anyhow::Result;
use rustc_hash::FxHashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Compressor
// ============================================================================

/// Compresses one asset in place.
pub trait AssetCompressor {
    fn compress(&self, asset: &Path) -> Result<()>;
}

/// Runs the configured command once per asset, with `$THEU_ASSET` bound to
/// the asset's absolute path.
pub struct ExternalCompressor {
    command: Vec<String>,
    vars: FxHashMap<String, String>,
    cwd: PathBuf,
    timeout: Duration,
}

impl ExternalCompressor {
    pub fn new(config: &CompressConfig, vars: FxHashMap<String, String>, cwd: &Path) -> Self {
        Self {
            command: config.command.clone(),
            vars,
            cwd: cwd.to_path_buf(),
            timeout: config.timeout(),
        }
    }
}

impl AssetCompressor for ExternalCompressor {
    fn compress(&self, asset: &Path) -> Result<()> {
        let mut vars = self.vars.clone();
        vars.insert("THEU_ASSET".into(), asset.display().to_string());

        let resolved = resolve_args(&self.command, &vars);
        Cmd::from_slice(&resolved)
            .cwd(&self.cwd)
            .envs(&vars)
            .timeout(self.timeout)
            .run()?;
        Ok(())
    }
}

// ============================================================================
// Report
// ============================================================================

/// One asset the compressor could not process.
#[derive(Debug, Clone)]
pub struct CompressFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for CompressFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Outcome of a compression pass.
#[derive(Debug, Default)]
pub struct CompressReport {
    pub compressed: usize,
    pub failures: Vec<CompressFailure>,
}

impl CompressReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Print one warning per failed asset.
    pub fn print_warnings(&self) {
        if self.is_clean() {
            return;
        }

        let count = self.failures.len();
        let suffix = if count == 1 { "" } else { "s" };
        log!("warning"; "{count} asset{suffix} left uncompressed:");
        for failure in &self.failures {
            eprintln!("- {failure}");
        }
    }
}

// ============================================================================
// Scan + compress
// ============================================================================

/// Compress every matching asset under `output_dir`.
///
/// Reading the asset directory is the only fatal error. A missing directory
/// means there is nothing to compress.
pub fn compress_assets(
    output_dir: &Path,
    config: &CompressConfig,
    compressor: &dyn AssetCompressor,
) -> Result<CompressReport, BuildError> {
    let mut report = CompressReport::default();
    if !config.enable {
        debug!("compress"; "disabled");
        return Ok(report);
    }

    let assets = scan_assets(&output_dir.join(&config.dir), config)?;
    if assets.is_empty() {
        return Ok(report);
    }

    let progress = ProgressLine::new(&[("assets", assets.len())]);
    for asset in assets {
        match compressor.compress(&asset) {
            Ok(()) => report.compressed += 1,
            Err(err) => report.failures.push(CompressFailure {
                path: asset,
                reason: format!("{err:#}"),
            }),
        }
        progress.inc("assets");
    }
    progress.finish();

    Ok(report)
}

/// Files directly in `dir` whose extension the config matches, sorted.
fn scan_assets(dir: &Path, config: &CompressConfig) -> Result<Vec<PathBuf>, BuildError> {
    if !dir.is_dir() {
        debug!("compress"; "{} not found, nothing to compress", dir.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|err| BuildError::Read(dir.to_path_buf(), err))?;
    let mut assets: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && config.matches(path))
        .collect();
    assets.sort();

    Ok(assets)
}
