//! Console logging setup and per-request spans.
//!
//! Logging is configured from an explicit [`LogConfig`] rather than read from
//! the environment at call sites. `RUST_LOG`, when set, still overrides the
//! configured level.
//!
//! [`request_trace_layer`] wraps every request in a `request` span carrying the
//! method, URI, peer address and, once authenticated, the user ID, so each
//! log line emitted while handling it is tagged with them.

use std::net::SocketAddr;

use anyhow::Context;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::{Span, field};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use fitrec_config::{LogConfig, LogFormat};

/// Directives used when `RUST_LOG` is unset. Noisy dependencies stay at warn.
pub fn default_directives(config: &LogConfig) -> String {
    format!(
        "{name}={level},fitrec_core={level},fitrec_auth={level},fitrec_config={level},\
         tower_http=warn,hyper=warn,reqwest=warn",
        name = env!("CARGO_CRATE_NAME"),
        level = config.level,
    )
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(config)))
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Fails if a subscriber has already been installed.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = build_filter(config);

    match config.format {
        LogFormat::Compact => {
            let console_layer = fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .with_filter(filter);
            tracing_subscriber::registry()
                .with(console_layer)
                .try_init()
                .context("Failed to initialize logging")?;
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(std::io::stderr)
                .with_filter(filter);
            tracing_subscriber::registry()
                .with(json_layer)
                .try_init()
                .context("Failed to initialize logging")?;
        }
    }

    tracing::debug!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}

pub type RequestTraceLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, fn(&Request<Body>) -> Span>;

/// Builds the span for one request. `remote_addr` is only known when the
/// server was started with `into_make_service_with_connect_info`.
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        remote_addr = field::Empty,
        user_id = field::Empty,
    );

    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        span.record("remote_addr", field::display(addr));
    }

    span
}

pub fn request_trace_layer() -> RequestTraceLayer {
    let make_span: fn(&Request<Body>) -> Span = make_request_span::<Body>;
    TraceLayer::new_for_http().make_span_with(make_span)
}

/// Tags the current request span with the authenticated user.
pub fn record_user_id(user_id: &str) {
    Span::current().record("user_id", field::display(user_id));
}
