//! HTTP server loop.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use surge_config::{Config, DatabaseConfig};
use surge_store::RuleStore;
use surge_store::sql::{SqlRuleStore, SqlStoreConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::ServerError;
use crate::routes::routes;

/// Open the SQL rule store described by `config`.
pub async fn connect_store(config: &DatabaseConfig) -> Result<SqlRuleStore, ServerError> {
    let store_config = SqlStoreConfig::new(config.url.clone())
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .init_schema(config.init_schema)
        .atomic_batches(config.atomic_batches);
    Ok(SqlRuleStore::connect(store_config).await?)
}

/// Run the server until Ctrl+C or SIGTERM.
pub async fn run(config: Config) -> Result<(), ServerError> {
    let store = connect_store(&config.database).await?;

    // Set up graceful shutdown on SIGTERM/SIGINT
    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal_handler().await;
        info!("shutdown signal received");
        shutdown_signal.cancel();
    });

    run_with_shutdown(config, Arc::new(store), shutdown).await
}

/// Wait for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
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
                warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Bind `config.server.listen` and serve until `shutdown` is cancelled.
pub async fn run_with_shutdown(
    config: Config,
    store: Arc<dyn RuleStore>,
    shutdown: CancellationToken,
) -> Result<(), ServerError> {
    let listener = TcpListener::bind(&config.server.listen).await?;
    let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    serve(listener, store, shutdown, timeout).await
}

/// Serve on an already bound listener.
///
/// After `shutdown` fires, in-flight requests get `timeout` to finish.
pub async fn serve(
    listener: TcpListener,
    store: Arc<dyn RuleStore>,
    shutdown: CancellationToken,
    timeout: Duration,
) -> Result<(), ServerError> {
    let addr = listener.local_addr()?;
    info!(%addr, "surge-rules listening");

    let server = axum::serve(listener, routes(store))
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();

    let drain_deadline = async {
        shutdown.cancelled().await;
        tokio::time::sleep(timeout).await;
    };

    tokio::select! {
        result = server => result?,
        _ = drain_deadline => {
            warn!(timeout_secs = timeout.as_secs(), "shutdown timeout elapsed, dropping in-flight requests");
        }
    }

    info!("server stopped");
    Ok(())
}
