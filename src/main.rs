use clap::Parser;
use lexsearch::cli::handlers;
use lexsearch::cli::Cli;
use lexsearch::cli::Commands;
use lexsearch::config::AppConfig;
use lexsearch::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = lexsearch::logging::init_logging_with_config(&config, cli.verbose)?;
    info!("Configuration loaded successfully");

    match cli.command {
        Commands::Ask { question } => handlers::handle_ask(&config, &question).await?,
        Commands::Search {
            query,
            limit,
            threshold,
        } => handlers::handle_search(&config, &query, limit, threshold).await?,
        Commands::Cite {
            query,
            limit,
            threshold,
        } => handlers::handle_cite(&config, &query, limit, threshold).await?,
        Commands::Serve { host, port, cors } => {
            handlers::handle_serve(&config, host, port, cors).await?;
        }
        Commands::Config => handlers::handle_config(&config),
    }

    Ok(())
}
