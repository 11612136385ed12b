//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// folio portfolio site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Root directory path
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Data directory path holding projects.json and skills.json (relative to project root)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Assets directory path (relative to project root)
    #[arg(short, long)]
    pub assets: Option<PathBuf>,

    /// Config file name (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// enable sitemap generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override base URL for the site.
    ///
    /// Useful when the production URL differs from local development,
    /// without editing folio.toml.
    ///
    /// Example:
    ///   folio build --base-url "https://alice.github.io/portfolio"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template portfolio site
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Build the site into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Serve the site. Rebuild on change automatically
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,

        /// enable watch
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Query the portfolio data and print the result as JSON
    Query {
        #[command(subcommand)]
        query: QueryCommand,
    },
}

/// Queries available through `folio query`
#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommand {
    /// Look up a single project by id
    Project {
        /// project id (slug)
        id: String,
    },

    /// List projects, optionally filtered by category
    Projects {
        /// web, mobile, full-stack or other
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List featured (live) projects
    Featured {
        /// maximum number of projects
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List skill category keys
    Categories,

    /// List skills, optionally for one category
    Skills {
        /// frontend, backend, mobile, tools or languages
        #[arg(short, long)]
        category: Option<String>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
    pub const fn is_query(&self) -> bool {
        matches!(self.command, Commands::Query { .. })
    }

    /// Build arguments of `build` or `serve`, if any.
    pub fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => Some(build_args),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("folio").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = parse(&["build", "--clean", "--minify=false", "--base-url", "https://a.dev"]);
        let args = cli.build_args().unwrap();

        assert!(cli.is_build());
        assert!(args.clean);
        assert_eq!(args.minify, Some(false));
        assert_eq!(args.sitemap, None);
        assert_eq!(args.base_url.as_deref(), Some("https://a.dev"));
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
    }

    #[test]
    fn test_parse_flag_without_value() {
        let cli = parse(&["build", "--sitemap"]);
        assert_eq!(cli.build_args().unwrap().sitemap, Some(true));
    }

    #[test]
    fn test_parse_serve() {
        let cli = parse(&["-r", "site", "serve", "-p", "8080", "--watch=false"]);

        assert!(cli.is_serve());
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        let Commands::Serve { port, watch, interface, .. } = &cli.command else {
            panic!("expected serve");
        };
        assert_eq!(*port, Some(8080));
        assert_eq!(*watch, Some(false));
        assert_eq!(*interface, None);
    }

    #[test]
    fn test_parse_query_subcommands() {
        let cli = parse(&["query", "featured", "--limit", "5"]);
        assert!(cli.is_query());
        assert!(cli.build_args().is_none());
        assert!(matches!(
            cli.command,
            Commands::Query { query: QueryCommand::Featured { limit: Some(5) } }
        ));

        let cli = parse(&["query", "projects", "-c", "mobile"]);
        assert!(matches!(
            cli.command,
            Commands::Query { query: QueryCommand::Projects { category: Some(ref c) } } if c == "mobile"
        ));

        let cli = parse(&["query", "project", "proj-a"]);
        assert!(matches!(
            cli.command,
            Commands::Query { query: QueryCommand::Project { ref id } } if id == "proj-a"
        ));
    }

    #[test]
    fn test_init_name() {
        let cli = parse(&["init", "my-site"]);
        assert!(cli.is_init());
        assert!(matches!(cli.command, Commands::Init { name: Some(ref n) } if n == &PathBuf::from("my-site")));
    }
}
