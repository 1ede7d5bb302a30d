//! Gig service (bandit-gig) - Main entry point
//!
//! Backend service for the Bandit tipping client: owns the active gig
//! session, runs request admission, and serves the live feed and event
//! stream over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bandit_common::config;
use bandit_gig::{api, simulator, SharedState};

/// Command-line arguments for bandit-gig
#[derive(Parser, Debug)]
#[command(name = "bandit-gig")]
#[command(about = "Gig session service for Bandit")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "BANDIT_GIG_PORT")]
    port: Option<u16>,

    /// Run the fan-activity simulator alongside real intake
    #[arg(long, env = "BANDIT_GIG_SIMULATE")]
    simulate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bandit_gig=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command-line arguments and merge with the config file
    let args = Args::parse();
    let service_config = config::load_service_config().context("Failed to load configuration")?;
    let port = args.port.unwrap_or(service_config.port);
    let simulate = args.simulate || service_config.simulate;

    info!("Starting Bandit gig service on port {}", port);

    // Initialize shared state
    let state = Arc::new(SharedState::new());

    // Optionally start the fan-activity simulator
    if simulate {
        simulator::spawn(Arc::clone(&state), service_config.currency.clone());
    }

    // Build the application router
    let app_state = api::AppState {
        state: Arc::clone(&state),
        currency: service_config.currency,
        port,
    };
    let app = api::create_router(app_state);

    // Create socket address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Starting HTTP server on {}", addr);

    // Create and run the server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal, then close out any gig still running
///
/// Ending the session broadcasts `GigEnded` to clients still draining their
/// streams and puts the final totals in the log before the process exits.
async fn shutdown_signal(state: Arc<SharedState>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }

    if let Ok(gig) = state.end_gig().await {
        info!(
            "Closed gig {} on shutdown: {} tips totaling {:.2}",
            gig.id, gig.totals.tip_count, gig.totals.tips
        );
    }
}
