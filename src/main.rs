mod clipboard;
mod config;
mod error;
mod files;
mod handlers;
mod net;
mod router;
mod state;

use clap::Parser;
use config::{Args, Config};
use state::AppState;
use std::sync::Arc;
use tokio::fs;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::from_args(args);

    match fs::canonicalize(&config.download_dir).await {
        Ok(path) if path.is_dir() => config.download_dir = path,
        Ok(path) => warn!(
            "'{}' is not a directory; listings will be empty and uploads will fail",
            path.display()
        ),
        Err(e) => warn!(
            "Download directory '{}' is not accessible ({}); listings will be empty until it exists",
            config.download_dir.display(),
            e
        ),
    }

    let clipboard = clipboard::for_platform(std::env::consts::OS);
    info!("Clipboard bridge: {}", clipboard.name());

    let bind_addr = config.bind_addr;
    let download_dir = config.download_dir.clone();
    let app = router::create_router(Arc::new(AppState::new(config, clipboard)));

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_addr, e);
            eprintln!("Error: Failed to bind to address {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    let rule = "=".repeat(50);
    println!("\n{}", rule);
    println!("📁 Downloads Sync");
    println!("{}", rule);
    println!("\n🌐 Server running at: {}", net::public_url(bind_addr));
    println!("\n📱 Open this URL on your phone's browser");
    println!("📂 Files will be saved to: {}", download_dir.display());
    println!("\n{}", rule);
    info!("Listening on: {}", bind_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Server stopped.");
}
