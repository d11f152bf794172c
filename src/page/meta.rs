//! Route metadata table.
//!
//! ```json
//! {
//!   "home": {
//!     "document": { "title": "THE∪" },
//!     "meta": { "description": "...", "og:title": "...", "twitter:card": "..." }
//!   }
//! }
//! ```
//!
//! Page order is kept as written, so derived routes follow the file.

use super::JsonMap;
use crate::core::{BuildError, read_input};
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::path::Path;

/// Key of the document title.
pub const TITLE_KEY: &str = "title";

/// `<meta>` keys substituted into every page, in template order.
pub const META_KEYS: [&str; 15] = [
    "description",
    "og:locale",
    "og:locale:alternate",
    "og:site_name",
    "og:title",
    "og:type",
    "og:url",
    "og:description",
    "og:image",
    "og:image:type",
    "og:image:width",
    "og:image:height",
    "twitter:card",
    "twitter:site",
    "twitter:creator",
];

/// All sixteen keys a page entry must provide.
pub fn required_keys() -> impl Iterator<Item = &'static str> {
    std::iter::once(TITLE_KEY).chain(META_KEYS)
}

/// Metadata of one logical page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub document: DocumentMeta,
    pub meta: JsonMap,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    pub title: Option<String>,
}

impl PageMeta {
    /// Value for `key` (`title` or a `<meta>` key).
    ///
    /// Numbers and booleans are rendered as written (`"og:image:width": 1200`).
    /// `null`, arrays and objects count as missing.
    pub fn value(&self, key: &str) -> Option<Cow<'_, str>> {
        if key == TITLE_KEY {
            return self.document.title.as_deref().map(Cow::Borrowed);
        }

        match self.meta.get(key)? {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }

    /// First required key without a value.
    pub fn first_missing_key(&self) -> Option<&'static str> {
        required_keys().find(|key| self.value(key).is_none())
    }
}

/// Page name -> metadata, in file order.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    pages: Vec<(String, PageMeta)>,
}

impl MetadataTable {
    /// Read and parse the table at `path`.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let content = read_input(path)?;
        Self::parse(&content).map_err(|err| BuildError::MetadataParse(path.to_path_buf(), err))
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let raw: JsonMap = serde_json::from_str(content)?;
        let pages = raw
            .into_iter()
            .map(|(name, value)| -> Result<(String, PageMeta), serde_json::Error> {
                Ok((name, serde_json::from_value(value)?))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { pages })
    }

    pub fn get(&self, page: &str) -> Option<&PageMeta> {
        self.pages
            .iter()
            .find_map(|(name, meta)| (name == page).then_some(meta))
    }

    /// Page names in file order.
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }
}
