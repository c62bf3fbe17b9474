use clap::Parser;
use recipes::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::Settings,
    corpus,
    recommender::Recommender,
    Error, Result,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipes=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host, corpus } => {
            serve(settings, port, host, corpus).await?;
        }
        Commands::Recommend {
            ingredients,
            top_n,
            corpus,
            server,
        } => match server {
            Some(server_url) => {
                recipes::cli::commands::recommend_remote(&server_url, &ingredients, top_n).await?;
            }
            None => {
                let recommender = build_recommender(&settings, corpus);
                recipes::cli::commands::recommend(&recommender, &ingredients, top_n)?;
            }
        },
        Commands::Inspect { corpus } => {
            let recommender = build_recommender(&settings, corpus);
            recipes::cli::commands::inspect(&recommender)?;
        }
    }

    Ok(())
}

/// Load the corpus and fit the model; an unreadable corpus yields an empty recommender
fn build_recommender(settings: &Settings, corpus_path: Option<PathBuf>) -> Recommender {
    let path = corpus_path.unwrap_or_else(|| settings.corpus.path.clone());
    let corpus = corpus::load_path(&path);

    if corpus.is_empty() {
        warn!("No usable recipes in {:?}; every query will return no matches", path);
    }

    Recommender::builder()
        .with_config(&settings.recommender)
        .build(corpus)
}

async fn serve(
    mut settings: Settings,
    port: Option<u16>,
    host: Option<String>,
    corpus_path: Option<PathBuf>,
) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(path) = corpus_path {
        settings.corpus.path = path;
    }

    info!("Starting recipe recommendation server");
    info!("Corpus: {:?}", settings.corpus.path);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Load and fit once, before accepting any requests
    let recommender = Arc::new(build_recommender(&settings, None));
    let stats = recommender.stats();

    let state = AppState {
        recommender,
        settings: settings.clone(),
    };

    let app = routes::create_router(state, &settings)?;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Recipe Recommender");
    println!("========================================");
    println!("Status: Running");
    println!("Address: {}", settings.server_url());
    println!(
        "Corpus: {} recipes ({} rows dropped)",
        stats.recipes, stats.load.rows_dropped
    );
    println!("Vocabulary: {} terms", stats.vocabulary_size);
    println!("\nAPI Endpoints:");
    println!("  GET  /api/recommend?ingredients=...&top_n=...");
    println!("  GET  /api/stats");
    println!("  GET  /health");
    println!("  GET  /ready");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
