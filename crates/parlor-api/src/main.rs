//! Parlor REST API entry point.
//!
//! Binary name: `parlor`
//!
//! Parses CLI arguments, initializes the database and services, then starts
//! the REST API server.

mod http;
mod state;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use parlor_infra::sqlite::pool::default_database_url;
use state::AppState;

#[derive(Parser)]
#[command(name = "parlor", version, about = "Minimal LLM chat service")]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = 5000)]
        port: u16,

        /// SQLite database URL (defaults to ~/.parlor/parlor.db)
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// API key for the completion provider
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Base URL for the completion provider
        #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
        base_url: String,

        /// Chat completion model
        #[arg(long, env = "PARLOR_MODEL", default_value = "gpt-4o-mini")]
        model: String,

        /// Directory with the static web client
        #[arg(long, env = "PARLOR_WEB_DIR", default_value = "web")]
        web_dir: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,parlor=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            database_url,
            api_key,
            base_url,
            model,
            web_dir,
        } => {
            let database_url = match database_url {
                Some(url) => url,
                None => {
                    let url = default_database_url();
                    // The default lives under a data dir that may not exist yet.
                    if let Some(path) = url.strip_prefix("sqlite://") {
                        if let Some(parent) = std::path::Path::new(path).parent() {
                            tokio::fs::create_dir_all(parent).await?;
                        }
                    }
                    url
                }
            };

            let state = AppState::init(&database_url, &api_key, &base_url, &model).await?;

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(addr = %addr, model = %model, "Parlor API listening");
            println!("Parlor API listening on http://{addr}");

            let router = http::router::build_router(state, &web_dir);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("Server stopped.");
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
