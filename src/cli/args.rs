//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// THE∪ build and publish pipeline
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: theu.toml)
    #[arg(short = 'C', long, global = true, default_value = "theu.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate a fresh build id (run before the bundler)
    Stamp,

    /// Generate pages, post-process assets, clean up and preview (run after the bundler)
    #[command(visible_alias = "f")]
    Finish {
        #[command(flatten)]
        finish_args: FinishArgs,

        /// Only generate these routes (repeatable, `/` for the site root)
        #[arg(short, long = "route", value_name = "ROUTE")]
        routes: Vec<String>,
    },

    /// Stamp, run the configured bundler, then finish
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        finish_args: FinishArgs,

        /// Keep the existing output directory instead of replacing it
        #[arg(long)]
        keep_output: bool,
    },

    /// Serve the output directory
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        serve_args: ServeArgs,
    },
}

/// Shared arguments for Finish and Build commands
#[derive(clap::Args, Debug, Clone)]
pub struct FinishArgs {
    /// Minify the generated HTML
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Skip geometry compression of model assets
    #[arg(long)]
    pub no_compress: bool,

    /// Exit after the build instead of starting the preview server
    #[arg(long)]
    pub no_serve: bool,

    #[command(flatten)]
    pub serve_args: ServeArgs,
}

/// Preview server arguments
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
    #[arg(short, long)]
    pub interface: Option<std::net::IpAddr>,

    /// Port number to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_finish_routes() {
        let cli = Cli::parse_from(["theu", "finish", "--route", "/", "-r", "the-veil", "--no-serve"]);
        match cli.command {
            Commands::Finish {
                finish_args,
                routes,
            } => {
                assert_eq!(routes, vec!["/", "the-veil"]);
                assert!(finish_args.no_serve);
                assert!(!finish_args.no_compress);
                assert_eq!(finish_args.minify, None);
            }
            _ => panic!("expected finish"),
        }
    }

    #[test]
    fn test_parse_minify_flag_forms() {
        let cli = Cli::parse_from(["theu", "build", "--minify"]);
        let Commands::Build { finish_args, .. } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(finish_args.minify, Some(true));

        let cli = Cli::parse_from(["theu", "build", "--minify", "false"]);
        let Commands::Build { finish_args, .. } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(finish_args.minify, Some(false));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["theu", "stamp", "-C", "site/theu.toml", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("site/theu.toml"));
        assert!(matches!(cli.command, Commands::Stamp));
    }

    #[test]
    fn test_serve_port() {
        let cli = Cli::parse_from(["theu", "serve", "-p", "9000", "-i", "0.0.0.0"]);
        let Commands::Serve { serve_args } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(serve_args.port, Some(9000));
        assert_eq!(serve_args.interface, Some("0.0.0.0".parse().unwrap()));
    }
}
