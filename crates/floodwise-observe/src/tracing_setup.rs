//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! # Usage
//!
//! ```no_run
//! // Structured logging at warn level unless RUST_LOG says otherwise
//! floodwise_observe::tracing_setup::init_tracing("warn", false).unwrap();
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::sync::OnceLock;

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Map CLI verbosity flags to a default filter directive.
///
/// `RUST_LOG`, when set, still takes precedence (see [`init_tracing`]).
pub fn filter_for_verbosity(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,floodwise=debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber.
///
/// - Always installs a `fmt` layer with span close timing.
/// - Uses `RUST_LOG` when set, otherwise `default_filter`.
/// - When `enable_otel` is true, additionally bridges tracing spans to
///   OpenTelemetry using a stdout exporter.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(
    default_filter: &str,
    enable_otel: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if enable_otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("floodwise");
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// No-op when OTel was not enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_for_verbosity() {
        assert_eq!(filter_for_verbosity(0, true), "error");
        assert_eq!(filter_for_verbosity(0, false), "warn");
        assert_eq!(filter_for_verbosity(1, true), "info,floodwise=debug");
        assert_eq!(filter_for_verbosity(3, false), "trace");
    }

    #[test]
    fn test_shutdown_without_init_is_noop() {
        shutdown_tracing();
    }
}
