//! Pipeline orchestration.
//!
//! ```text
//! theu build   clean -> stamp -> bundler -> finish
//! theu stamp   stamp
//! theu finish  read inputs -> pages -> decoder -> compress -> cleanup -> serve
//! ```
//!
//! Steps run in order and the first fatal error stops the pipeline. Output
//! already written stays on disk.

use crate::{
    asset::{
        AssetCompressor, CompressReport, ExternalCompressor, compress_assets,
        revert_decoder_names,
    },
    config::Config,
    core::BuildContext,
    debug, hooks, log,
    page::{generate_all, resolve_routes},
    stamp::{self, BuildId},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// What `finish` produced.
#[derive(Debug)]
pub struct FinishSummary {
    pub pages: usize,
    pub decoder_files: usize,
    pub compress: CompressReport,
}

/// `theu stamp`: fresh scratch directory and build id.
pub fn stamp_build(config: &Config) -> Result<BuildId> {
    let id = stamp::generate_build_id(&config.build.scratch)?;
    log!("stamp"; "build id {id}");
    Ok(id)
}

/// `theu finish`: everything after the bundler.
pub fn finish_build(config: &Config, only: &[String]) -> Result<FinishSummary> {
    let ctx = BuildContext::load(config).context("failed to read build inputs")?;
    let vars = hooks::build_theu_vars(config, ctx.build_id.as_str());
    let compressor = ExternalCompressor::new(&config.build.compress, vars, config.get_root());
    finish_with(&ctx, only, &compressor)
}

/// `theu build`: clean, stamp, bundle, finish.
pub fn build_site(config: &Config) -> Result<FinishSummary> {
    if config.build.clean {
        clean_output(&config.build.output)?;
    }

    let id = stamp_build(config)?;
    hooks::run_bundler(config, id.as_str())?;
    finish_build(config, &[])
}

fn finish_with(
    ctx: &BuildContext,
    only: &[String],
    compressor: &dyn AssetCompressor,
) -> Result<FinishSummary> {
    let build = &ctx.config.build;

    let routes = resolve_routes(&build.routes, &build.home, &ctx.metadata, only)?;
    if routes.is_empty() {
        log!("warning"; "no routes to generate, {} has no pages", build.metadata.display());
    }
    let written = generate_all(ctx, &routes)?;

    let decoder_files = revert_decoder_names(&build.output, &build.decoder)?;
    if decoder_files > 0 {
        debug!("decoder"; "reverted {} file(s)", decoder_files);
    }

    let report = compress_assets(&build.output, &build.compress, compressor)?;
    report.print_warnings();

    stamp::remove_scratch(&build.scratch)?;

    let pages = written.len();
    log!("done"; "{} page{} in {}", pages, if pages == 1 { "" } else { "s" }, build.output.display());

    Ok(FinishSummary {
        pages,
        decoder_files,
        compress: report,
    })
}

/// Remove the previous output so stale stamped scripts do not pile up.
fn clean_output(output: &Path) -> Result<()> {
    if output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clear output directory {}", output.display()))?;
    }
    Ok(())
}
