mod classify;
mod config;
mod corpus;
mod descriptor;
mod error;
mod model;
mod parser;
mod search;
mod selector;
mod server;
mod template;

use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use corpus::Corpus;
use selector::ReferenceSelector;
use server::CppReviewServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting cpp-review MCP server");

    let config = Config::from_env()?;
    info!(
        references = config.references_path.as_deref().unwrap_or("embedded"),
        tcp = config.tcp_listen_addr.is_some(),
        "configuration loaded"
    );

    // Loaded once; every request after this point is a read.
    let corpus = Corpus::load(&config)?;
    info!(
        origin = %corpus.origin,
        documents = corpus.documents.len(),
        "reference corpus loaded"
    );
    let selector = Arc::new(ReferenceSelector::from_corpus(corpus)?);

    let server = CppReviewServer::new(selector);

    if let Some(addr) = config.tcp_listen_addr.as_deref() {
        let listener = TcpListener::bind(addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
