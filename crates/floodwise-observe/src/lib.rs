//! Observability setup for Floodwise: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
