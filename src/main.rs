use std::{io, net::SocketAddr, path::PathBuf};

use clap::Parser;

use axum_server::Handle;

use account_board::{
    app::AppState,
    cli::{Args, Command, list_records},
    config::read_config,
    routes,
    store::RecordStore,
};

use anyhow::Error;

use tokio::{main, select, signal};

use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
};

#[main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    fmt::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Args::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => PathBuf::from("config.toml"),
    };

    // Read config file
    let config = read_config(config_path)?;

    tracing::info!(path = %config.store.path.display(), "opening record store");

    let store = RecordStore::open(&config.store.path).await?;

    // Run any pending commands
    if let Some(command) = cli.command.as_ref() {
        match command {
            Command::List => list_records(&store).await?,
        }

        return Ok(());
    }

    // Create app state
    let state = AppState { store };

    let router = routes::router(state);

    let handle = Handle::new();

    // run shutdown task to detect shutdowns
    tokio::spawn(shutdown_signal(handle.clone()));

    let addr: SocketAddr = ([0, 0, 0, 0], config.http.port).into();

    tracing::info!("listening on {} (http)", addr);

    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    tracing::info!("shutting down");

    Ok(())
}

// Stolen from: https://github.com/maxcountryman/tower-sessions-stores/tree/main/sqlx-store
async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    select! {
        _ = ctrl_c => { handle.graceful_shutdown(None) }
        _ = terminate => { handle.graceful_shutdown(None) }
    }
}
