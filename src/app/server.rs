use crate::error::IngestError;
use axum::Router;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// The process signal that requested shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownSignal {
    Interrupt,
    Terminate,
}

/// Serve `app` on `http_port` until SIGINT/SIGTERM or `shutdown_token` fires.
pub async fn serve(
    app: Router,
    http_port: u16,
    shutdown_token: CancellationToken,
) -> Result<(), IngestError> {
    let bind_addr = format!("0.0.0.0:{http_port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| IngestError::Bind {
            address: bind_addr,
            source,
        })?;
    info!(
        address = %listener.local_addr()?,
        routes = "GET /v1/health, POST /logs",
        "Ingest service listening"
    );

    cancel_on_signal(shutdown_token.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_token.cancelled_owned())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Cancel `token` once the process receives SIGINT or SIGTERM.
pub(crate) fn cancel_on_signal(token: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            signal = wait_for_signal() => {
                info!(?signal, "Initiating graceful shutdown");
                token.cancel();
            }
            () = token.cancelled() => {}
        }
    });
}

async fn wait_for_signal() -> ShutdownSignal {
    let interrupt = async {
        match signal::ctrl_c().await {
            Ok(()) => ShutdownSignal::Interrupt,
            Err(e) => {
                warn!(error = %e, "Could not listen for SIGINT");
                std::future::pending().await
            }
        }
    };

    tokio::select! {
        signal = interrupt => signal,
        signal = terminate() => signal,
    }
}

#[cfg(unix)]
async fn terminate() -> ShutdownSignal {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
            ShutdownSignal::Terminate
        }
        Err(e) => {
            warn!(error = %e, "Could not listen for SIGTERM");
            std::future::pending().await
        }
    }
}

#[cfg(not(unix))]
async fn terminate() -> ShutdownSignal {
    std::future::pending().await
}
