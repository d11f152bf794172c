//! Configuration section definitions.
//!
//! Each module corresponds to a section in `theu.toml`:
//!
//! | Module  | TOML Section | Purpose                                  |
//! |---------|--------------|------------------------------------------|
//! | `build` | `[build]`    | Paths, routes, bundler, assets, decoder  |
//! | `serve` | `[serve]`    | Preview server                           |

pub mod build;
mod serve;

pub use build::BuildSectionConfig;
pub use serve::ServeConfig;
