//! Process and host helpers.

use tracing::{error, warn};

/// Toolchain version captured at build time.
pub const RUSTC_VERSION: &str = env!("ITEM_STORE_RUSTC_VERSION");

/// Wait for Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => warn!("Ctrl+C received: closing HTTP server"),
        _ = terminate => warn!("SIGTERM signal received: closing HTTP server"),
    }
}

/// Operating system identifier, e.g. "linux" or "macos".
pub fn platform() -> &'static str {
    std::env::consts::OS
}

/// Host name of the machine, or "unknown".
pub fn hostname() -> String {
    let name = gethostname::gethostname();
    let name = name.to_string_lossy();
    let name = name.trim();

    if name.is_empty() {
        "unknown".to_string()
    } else {
        name.to_string()
    }
}
