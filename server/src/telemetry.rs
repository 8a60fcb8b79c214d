//! Logging and telemetry setup.
//!
//! Console logging is always on. Traces and logs are additionally exported over
//! OTLP when `OTEL_EXPORTER_OTLP_ENDPOINT` is set and the collector answers.
//! A tracing Layer also counts database statements per HTTP request.

use axum::{
    body::Body, extract::State, http::Request, middleware::Next, response::Response,
};
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};
use std::time::Duration;
use tracing::{span::Id, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::Context, registry::LookupSpan, EnvFilter, Layer};

pub const DB_QUERY_COUNT_HEADER: &str = "X-DB-Query-Count";

/// Keeps the OTLP providers alive; call [`TelemetryGuard::shutdown`] before exit
/// so buffered spans and logs are flushed.
pub struct TelemetryGuard {
    providers: Option<(SdkTracerProvider, SdkLoggerProvider)>,
}

impl TelemetryGuard {
    pub fn shutdown(self) {
        let Some((traces, logs)) = self.providers else {
            return;
        };
        if let Err(e) = traces.shutdown() {
            tracing::warn!("Failed to flush traces: {}", e);
        }
        if let Err(e) = logs.shutdown() {
            tracing::warn!("Failed to flush logs: {}", e);
        }
    }
}

/// Install the global tracing subscriber.
pub fn init_telemetry() -> anyhow::Result<TelemetryGuard> {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(DbQueryCountingLayer);

    let Some(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok() else {
        registry.try_init()?;
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return Ok(TelemetryGuard { providers: None });
    };

    if !collector_reachable(&endpoint) {
        registry.try_init()?;
        tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        );
        return Ok(TelemetryGuard { providers: None });
    }

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "recipe-server".to_string());

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.clone())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()?;

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let tracer = trace_provider.tracer("recipe-server");
    opentelemetry::global::set_tracer_provider(trace_provider.clone());

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()?;

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    registry
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(OpenTelemetryTracingBridge::new(&log_provider))
        .try_init()?;

    tracing::info!(
        "OpenTelemetry enabled, exporting traces and logs to {} as {}",
        endpoint,
        service_name
    );

    Ok(TelemetryGuard {
        providers: Some((trace_provider, log_provider)),
    })
}

/// Quick TCP probe so a configured but absent collector doesn't stall exports.
fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://");

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

tokio::task_local! {
    /// Database statements issued by the current request.
    static DB_QUERY_COUNTER: Arc<AtomicU32>;
}

/// Get the current database query count for this request, if available.
pub fn get_query_count() -> Option<u32> {
    DB_QUERY_COUNTER
        .try_with(|counter| counter.load(Ordering::Relaxed))
        .ok()
}

/// Counts `db.query` spans into the task-local counter of the request.
///
/// The store runs its statements synchronously inside the handler's task, so
/// the task-local set up by [`query_counting_middleware`] is visible here.
pub struct DbQueryCountingLayer;

impl<S> Layer<S> for DbQueryCountingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, _attrs: &tracing::span::Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };

        if span.name() == "db.query" {
            let _ = DB_QUERY_COUNTER.try_with(|counter| {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
    }
}

/// Initializes the per-request database query counter.
pub async fn query_counting_middleware(request: Request<Body>, next: Next) -> Response {
    let counter = Arc::new(AtomicU32::new(0));
    DB_QUERY_COUNTER.scope(counter, next.run(request)).await
}

/// Whether `TRACK_DB_QUERY_COUNT=1` asks for the query count header.
pub fn query_count_header_enabled() -> bool {
    env::var("TRACK_DB_QUERY_COUNT")
        .map(|v| v == "1")
        .unwrap_or(false)
}

/// Adds the query count header when `enabled`.
pub async fn db_query_count_header_middleware(
    State(enabled): State<bool>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    if enabled {
        if let Some(count) = get_query_count() {
            if let Ok(value) = axum::http::header::HeaderValue::from_str(&count.to_string()) {
                response.headers_mut().insert(DB_QUERY_COUNT_HEADER, value);
            }
        }
    }

    response
}
