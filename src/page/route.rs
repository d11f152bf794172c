//! Routes: output location plus the metadata page rendered there.

use super::MetadataTable;
use crate::core::BuildError;
use crate::utils::path::is_contained;
use std::collections::BTreeMap;
use std::path::Path;

/// One generated page.
///
/// ```text
/// Route { path: "",              page: "home" }      -> dist/index.html
/// Route { path: "work/the-veil", page: "the-veil" }  -> dist/work/the-veil/index.html
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Slash-separated path below the output directory, `""` for the site root.
    pub path: String,
    /// Page name in the metadata table.
    pub page: String,
}

impl Route {
    pub fn new(path: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            page: page.into(),
        }
    }

    /// Relative prefix from this route's directory back to the site root.
    pub fn root_prefix(&self) -> String {
        match self.depth() {
            0 => "./".to_string(),
            depth => "../".repeat(depth),
        }
    }

    fn depth(&self) -> usize {
        self.path.split('/').filter(|s| !s.is_empty()).count()
    }
}

/// Canonical form of a user-supplied route: no leading, trailing or doubled
/// slashes, `/` for the site root becomes `""`.
pub fn normalize_route(route: &str) -> Result<String, BuildError> {
    let normalized = route
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if !is_contained(Path::new(&normalized)) || normalized.split('/').any(|s| s == ".") {
        return Err(BuildError::InvalidRoute(route.to_string()));
    }
    Ok(normalized)
}

/// Routes to generate.
///
/// Configured routes win. Otherwise every table page gets a route: `home`
/// at the site root, any other page at its own name. A non-empty `only`
/// restricts the result to those routes.
pub fn resolve_routes(
    configured: &BTreeMap<String, String>,
    home: &str,
    table: &MetadataTable,
    only: &[String],
) -> Result<Vec<Route>, BuildError> {
    let mut routes = Vec::new();

    if configured.is_empty() {
        for page in table.pages() {
            let path = if page == home {
                String::new()
            } else {
                normalize_route(page)?
            };
            routes.push(Route::new(path, page));
        }
    } else {
        for (path, page) in configured {
            routes.push(Route::new(normalize_route(path)?, page.as_str()));
        }
    }

    if only.is_empty() {
        return Ok(routes);
    }

    let mut selected = Vec::with_capacity(only.len());
    for wanted in only {
        let wanted = normalize_route(wanted)?;
        let route = routes
            .iter()
            .find(|r| r.path == wanted)
            .ok_or_else(|| BuildError::UnknownRoute(wanted.clone()))?;
        if !selected.contains(route) {
            selected.push(route.clone());
        }
    }
    Ok(selected)
}
