//! Command handlers

use std::sync::Arc;

use tracing::info;

use crate::cli::output::print_answer;
use crate::cli::output::print_config;
use crate::cli::output::print_documents;
use crate::config::AppConfig;
use crate::rag::LegalSearchPipeline;
use crate::Result;

pub async fn handle_ask(config: &AppConfig, question: &str) -> Result<()> {
    let pipeline = LegalSearchPipeline::from_config(config).await?;
    let answer = pipeline.answer_with_sources(question).await?;
    print_answer(&answer);
    Ok(())
}

pub async fn handle_search(
    config: &AppConfig,
    query: &str,
    limit: Option<usize>,
    threshold: Option<f32>,
) -> Result<()> {
    let pipeline = LegalSearchPipeline::from_config(config).await?;
    let documents = pipeline.search(query, limit, threshold).await?;
    print_documents(&documents);
    Ok(())
}

pub async fn handle_cite(
    config: &AppConfig,
    query: &str,
    limit: Option<usize>,
    threshold: Option<f32>,
) -> Result<()> {
    let pipeline = LegalSearchPipeline::from_config(config).await?;
    let answer = pipeline.citation_answer(query, limit, threshold).await?;
    if answer.is_empty() {
        println!("No matching documents found.");
    } else {
        println!("{answer}");
    }
    Ok(())
}

pub async fn handle_serve(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: bool,
) -> Result<()> {
    let mut server = config.server.clone();
    // CLI arguments take priority over config
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    server.enable_cors |= cors;

    info!("Host: {} Port: {} CORS: {}", server.host, server.port, server.enable_cors);

    let pipeline = Arc::new(LegalSearchPipeline::from_config(config).await?);
    crate::api::serve_api(pipeline, &server).await
}

pub fn handle_config(config: &AppConfig) {
    print_config(config);
}
