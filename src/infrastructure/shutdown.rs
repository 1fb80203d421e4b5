//! Graceful Shutdown Handler
//!
//! Resolves when the process is asked to stop, so the HTTP server can drain
//! in-flight requests before exiting.

use std::future::Future;

/// Which signal ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    CtrlC,
    Terminate,
}

/// Wait for whichever of `ctrl_c` and `terminate` completes first.
pub async fn wait_for_shutdown<C, T>(ctrl_c: C, terminate: T) -> ShutdownReason
where
    C: Future<Output = ()>,
    T: Future<Output = ()>,
{
    tokio::select! {
        _ = ctrl_c => ShutdownReason::CtrlC,
        _ = terminate => ShutdownReason::Terminate,
    }
}

/// Install signal handlers for graceful shutdown.
///
/// Returns a future that completes when Ctrl+C or SIGTERM is received. A
/// handler that cannot be installed is logged and never fires.
#[cfg_attr(coverage_nightly, coverage(off))]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    match wait_for_shutdown(ctrl_c, terminate).await {
        ShutdownReason::CtrlC => tracing::info!("received Ctrl+C, initiating shutdown"),
        ShutdownReason::Terminate => tracing::info!("received SIGTERM, initiating shutdown"),
    }
}
