//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "lexsearch")]
#[command(about = "Semantic legal-document search and grounded answers")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: level from config)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the TOML config file (default: config.toml, then config.example.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a legal question grounded in retrieved documents
    Ask {
        /// The question
        question: String,
    },
    /// Show the documents most similar to a query
    Search {
        /// Search text
        query: String,
        /// Maximum number of documents
        #[arg(short, long)]
        limit: Option<usize>,
        /// Minimum similarity (0.0-1.0)
        #[arg(short, long)]
        threshold: Option<f32>,
    },
    /// Print a citation answer built from the matching documents, without a model call
    Cite {
        /// Search text
        query: String,
        /// Maximum number of documents
        #[arg(short, long)]
        limit: Option<usize>,
        /// Minimum similarity (0.0-1.0)
        #[arg(short, long)]
        threshold: Option<f32>,
    },
    /// Start the REST API server
    Serve {
        /// Host address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Enable permissive CORS
        #[arg(long)]
        cors: bool,
    },
    /// Show current configuration with secrets masked
    Config,
}
