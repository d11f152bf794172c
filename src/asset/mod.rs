//! Post-processing of bundler output.
//!
//! - `decoder`: revert stamped decoder filenames in vendor scripts
//! - `compress`: re-compress model assets with an external tool
//! - `minify`: minification of generated pages

pub mod compress;
mod decoder;
pub mod minify;

pub use compress::{AssetCompressor, CompressReport, ExternalCompressor, compress_assets};
pub use decoder::revert_decoder_names;
