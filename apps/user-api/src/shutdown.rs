use std::time::Duration;
use tokio::signal;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
}

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

/// Resolves once the process is asked to stop, then tells `started` so the
/// drain deadline can begin.
pub async fn shutdown_signal(started: oneshot::Sender<ShutdownReason>) {
    let reason = tokio::select! {
        _ = ctrl_c() => ShutdownReason::Interrupt,
        _ = terminate() => ShutdownReason::Terminate,
    };

    tracing::info!(reason = ?reason, "initiating graceful shutdown");
    let _ = started.send(reason);
}

/// Completes `timeout` after shutdown starts. Never completes if it never starts.
pub async fn drain_deadline(started: oneshot::Receiver<ShutdownReason>, timeout: Duration) {
    if started.await.is_err() {
        std::future::pending::<()>().await;
    }

    tracing::info!(timeout_secs = timeout.as_secs(), "allowing connections to drain");
    tokio::time::sleep(timeout).await;
}
