mod api;
mod config;
mod db;
mod models;
mod schema;
mod store;
mod telemetry;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::Request;
use axum::middleware;
use axum::Router;
use std::env;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use config::Config;
use store::{PgRecipeStore, RecipeStore};

/// Application state shared across all handlers
pub type AppState = Arc<dyn RecipeStore>;

/// Wrap the API router with panic recovery, request logging and per-request
/// query counting.
fn app(store: AppState) -> Router {
    api::router(store)
        .layer(middleware::from_fn_with_state(
            telemetry::query_count_header_enabled(),
            telemetry::db_query_count_header_middleware,
        ))
        .layer(CatchPanicLayer::custom(api::response::panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Liveness probes are too noisy to log
                    if matched_path == api::health::PING_PATH {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
        .layer(middleware::from_fn(telemetry::query_counting_middleware))
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("Failed to render OpenAPI spec")?;
        println!("{}", spec);
        return Ok(());
    }

    // Before telemetry, so RUST_LOG and OTEL_* from .env are honored
    let env_file = config::load_dotenv();

    let telemetry = telemetry::init_telemetry().context("Failed to initialize telemetry")?;
    if let Some(path) = env_file {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env().context("Failed to read configuration")?;

    let pool = db::create_pool(
        &config.database.connection_string(),
        config.database.pool_size,
    )
    .context("Failed to connect to database")?;
    tracing::info!(
        "Connected to database {} on {}:{}",
        config.database.name,
        config.database.host,
        config.database.port
    );

    let store: AppState = Arc::new(PgRecipeStore::new(pool));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.app_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!(
        "OpenAPI spec available at http://localhost:{}{}",
        config.app_port,
        api::OPENAPI_PATH
    );

    let stop = Arc::new(Notify::new());
    let mut server = tokio::spawn(
        axum::serve(listener, app(store.clone()))
            .with_graceful_shutdown({
                let stop = stop.clone();
                async move { stop.notified().await }
            })
            .into_future(),
    );

    tokio::select! {
        result = &mut server => {
            // The server stopped on its own, before any signal.
            result.context("Server task panicked")?.context("Server error")?;
        }
        _ = shutdown_signal() => {
            tracing::info!(
                "Shutdown requested, waiting up to {:?} for in-flight requests",
                config.shutdown_timeout
            );
            stop.notify_one();

            match tokio::time::timeout(config.shutdown_timeout, &mut server).await {
                Ok(result) => {
                    result.context("Server task panicked")?.context("Server error")?;
                    tracing::info!("Shut down gracefully");
                }
                Err(_) => {
                    server.abort();
                    tracing::warn!("Shutdown timed out, dropping remaining connections");
                }
            }
        }
    }

    drop(store);
    telemetry.shutdown();

    Ok(())
}
