// Command-line interface

pub mod commands;

use crate::matching::DietaryConstraint;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pakauu")]
#[command(about = "Pakauu - find recipes from the ingredients you have", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Print the canonical ingredient tokens for some text
    Normalize {
        /// Comma-separated ingredients, e.g. "aloo, pyaaz, tamatar"
        text: String,
    },

    /// Search the corpus locally
    Search {
        /// Comma-separated ingredients
        ingredients: String,

        /// Dietary preference: both, veg or non-veg
        #[arg(short, long, default_value = "both")]
        dietary: DietaryConstraint,

        /// Number of people to cook for
        #[arg(long, default_value_t = 2)]
        people: u32,

        /// Maximum number of recipes to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Check that a corpus loads and report skipped records
    Validate {
        /// File path or URL; defaults to CORPUS_SOURCE
        source: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_command() {
        let cli = Cli::try_parse_from([
            "pakauu",
            "search",
            "aloo, pyaaz",
            "--dietary",
            "non-veg",
            "--people",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                ingredients,
                dietary,
                people,
                limit,
            } => {
                assert_eq!(ingredients, "aloo, pyaaz");
                assert_eq!(dietary, DietaryConstraint::NonVegetarianOnly);
                assert_eq!(people, 3);
                assert_eq!(limit, 20);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_reject_unknown_dietary() {
        assert!(Cli::try_parse_from(["pakauu", "search", "aloo", "--dietary", "vegan"]).is_err());
    }
}
