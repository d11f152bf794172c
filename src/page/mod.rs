//! Static page generation.
//!
//! One `index.html` per route, rendered from the bundler template:
//!
//! ```text
//! template + build id + metadata[page]
//!     -> stamp script references     (template)
//!     -> fill the sixteen meta slots (template)
//!     -> minify                      (asset::minify)
//!     -> <output>/<route>/index.html
//! ```

mod meta;
mod route;
mod template;

pub use meta::{MetadataTable, PageMeta};
pub use route::{Route, normalize_route, resolve_routes};
pub use template::render_page;

use crate::asset::minify::minify_page;
use crate::core::{BuildContext, BuildError};
use crate::logger::ProgressLine;
use std::fs;
use std::path::{Path, PathBuf};

/// A JSON object map, key order preserved.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Output file of `route` below `output_dir`.
pub fn page_path(output_dir: &Path, route: &Route) -> PathBuf {
    output_dir.join(&route.path).join("index.html")
}

/// Render and write one route. Nothing is written when rendering fails.
pub fn generate_page(ctx: &BuildContext, route: &Route) -> Result<PathBuf, BuildError> {
    let build = &ctx.config.build;

    let page = ctx
        .metadata
        .get(&route.page)
        .ok_or_else(|| BuildError::MissingMetadata {
            route: route.path.clone(),
            page: route.page.clone(),
        })?;

    let html = render_page(
        &ctx.template,
        route,
        ctx.build_id.as_str(),
        &build.scripts,
        page,
    )?;
    let html = if build.minify {
        minify_page(&html)
    } else {
        html.into_bytes()
    };

    let path = page_path(&build.output, route);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|err| BuildError::CreateDir(dir.to_path_buf(), err))?;
    }
    fs::write(&path, html).map_err(|err| BuildError::Write(path.clone(), err))?;

    Ok(path)
}

/// Generate every route in order, stopping at the first failure.
pub fn generate_all(ctx: &BuildContext, routes: &[Route]) -> Result<Vec<PathBuf>, BuildError> {
    let progress = ProgressLine::new(&[("pages", routes.len())]);
    let mut written = Vec::with_capacity(routes.len());

    for route in routes {
        written.push(generate_page(ctx, route)?);
        progress.inc("pages");
    }

    progress.finish();
    Ok(written)
}
