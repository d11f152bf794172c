//! Template substitution.
//!
//! Placeholders are matched literally and exactly: the bundler template
//! carries empty `<title></title>` and `"<key>" content="">` slots, plus the
//! unstamped script references.

use super::{PageMeta, Route, meta};
use crate::config::ScriptRef;
use crate::core::BuildError;
use crate::utils::html::escape_attr;

/// Template slot for a metadata key.
pub fn placeholder(key: &str) -> String {
    if key == meta::TITLE_KEY {
        "<title></title>".to_string()
    } else {
        format!("\"{key}\" content=\"\">")
    }
}

fn filled(key: &str, value: &str) -> String {
    let value = escape_attr(value);
    if key == meta::TITLE_KEY {
        format!("<title>{value}</title>")
    } else {
        format!("\"{key}\" content=\"{value}\">")
    }
}

/// Render one route from the template.
///
/// Every value and every placeholder is checked before anything is
/// substituted, so an error never leaves a half-rendered page behind.
pub fn render_page(
    template: &str,
    route: &Route,
    build_id: &str,
    scripts: &[ScriptRef],
    page: &PageMeta,
) -> Result<String, BuildError> {
    if let Some(key) = page.first_missing_key() {
        return Err(BuildError::MissingMetadataKey {
            route: route.path.clone(),
            key: key.to_string(),
        });
    }

    let slots: Vec<_> = meta::required_keys()
        .map(|key| (key, placeholder(key)))
        .collect();

    let expected = scripts
        .iter()
        .map(|script| script.placeholder.as_str())
        .chain(slots.iter().map(|(_, slot)| slot.as_str()));
    for slot in expected {
        if !template.contains(slot) {
            return Err(BuildError::TemplateMismatch {
                route: route.path.clone(),
                placeholder: slot.to_string(),
            });
        }
    }

    let root = route.root_prefix();
    let mut html = template.to_string();
    for script in scripts {
        html = html.replace(&script.placeholder, &script.render(&root, build_id));
    }
    for (key, slot) in &slots {
        // Presence was checked above
        let value = page.value(key).unwrap_or_default();
        html = html.replace(slot, &filled(key, &value));
    }

    Ok(html)
}
