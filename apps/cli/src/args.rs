//! Command line structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "chamber")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Inspect configured domains and build cross-domain URLs")]
pub(crate) struct Cli {
    /// Configuration file (defaults to `chamber.*` in the working directory)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List configured domains in declaration order
    Domains {},
    /// Show one domain
    Domain {
        /// Site id
        site_id: u32,
    },
    /// Build the URL of a named route
    Reverse {
        /// Route name
        name: String,
        /// Target site (defaults to the configured site)
        #[arg(short, long = "site")]
        site_id: Option<u32>,
        /// Prefix the path with the domain's base URL
        #[arg(long)]
        add_domain: bool,
        /// Route table to use instead of the domain's own
        #[arg(long)]
        urlconf: Option<String>,
        /// Positional route argument (repeatable)
        #[arg(long = "arg", value_name = "VALUE")]
        args: Vec<String>,
        /// Keyword route argument (repeatable)
        #[arg(long = "kwarg", value_name = "KEY=VALUE", value_parser = parse_pair)]
        kwargs: Vec<(String, String)>,
        /// Query string parameter (repeatable)
        #[arg(long = "qs", value_name = "KEY=VALUE", value_parser = parse_pair)]
        query: Vec<(String, String)>,
    },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}
