// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "recipes")]
#[command(about = "Recipe recommendations from the ingredients you have", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the recommendation API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Recipe corpus (CSV or JSON)
        #[arg(long, env = "CORPUS_PATH")]
        corpus: Option<PathBuf>,
    },

    /// Recommend recipes for a list of ingredients
    Recommend {
        /// Comma-separated ingredients, e.g. "chicken, tomato, garlic"
        ingredients: String,

        /// Maximum number of recipes to show
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Recipe corpus (CSV or JSON); defaults to CORPUS_PATH
        #[arg(long, conflicts_with = "server")]
        corpus: Option<PathBuf>,

        /// Query a running server instead of loading the corpus locally
        #[arg(long)]
        server: Option<String>,
    },

    /// Load the corpus and print corpus and model statistics
    Inspect {
        /// Recipe corpus (CSV or JSON)
        #[arg(long, env = "CORPUS_PATH")]
        corpus: Option<PathBuf>,
    },
}
