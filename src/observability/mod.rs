//! OpenTelemetry tracing with file-based OTLP export.
//!
//! Spans from `tracing` macros throughout the crate are exported as OTLP/JSON,
//! one batch per line, to `<data_dir>/boostfocus-otlp.json`. The file rotates
//! at 10 MB and keeps 3 backups.
//!
//! Trace level resolution:
//! 1. `RUST_LOG` environment variable
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. `"info"`
//!
//! - `init`: subscriber setup
//! - `exporter`: the `SpanExporter` and tracer provider
//! - `otlp`: span to JSON encoding
//! - `rotating`: size-capped trace file

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, TRACE_FILE};
