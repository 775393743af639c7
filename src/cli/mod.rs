//! Command-line interface for CityScout.

mod commands;

pub use commands::{cmd_init, cmd_resolve, cmd_serve};

use clap::{Parser, Subcommand};

/// CityScout - location search aggregator
/// Resolves places and caches weather, meetups, movies and shops around them
#[derive(Parser)]
#[command(name = "cityscout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "s")]
    Serve,

    /// Write a default config file if none exists
    Init,

    /// Resolve a search string to a stored location
    #[command(alias = "r")]
    Resolve {
        /// Free-text place name
        #[arg(required = true)]
        query: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["cityscout"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_resolve_joins_words() {
        let cli = Cli::try_parse_from(["cityscout", "resolve", "seattle", "wa"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Resolve {
                query: vec!["seattle".to_string(), "wa".to_string()]
            })
        );
    }

    #[test]
    fn test_resolve_requires_query() {
        assert!(Cli::try_parse_from(["cityscout", "resolve"]).is_err());
    }
}
