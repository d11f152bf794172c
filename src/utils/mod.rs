//! Shared helpers with no pipeline state.
//!
//! - [`exec`]: external command builder (bundler, asset tools)
//! - [`html`]: attribute escaping
//! - [`mime`]: content types for the preview server
//! - [`path`]: path normalization and containment

pub mod exec;
pub mod html;
pub mod mime;
pub mod path;
