//! External tool hooks.
//!
//! - `runner`: `$THEU_*` variables, argument substitution, bundler execution

mod runner;

pub use runner::*;
