//! Subscriber setup.

use super::exporter::{create_tracer_provider, SCOPE};
use super::rotating::RotationPolicy;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace output inside the data directory.
pub const TRACE_FILE: &str = "boostfocus-otlp.json";

/// Installs the global subscriber exporting spans to `<data_dir>/boostfocus-otlp.json`.
///
/// The filter comes from `RUST_LOG` when set, else `config.trace_level`, else
/// `"info"`. Tracing is best-effort: if the data directory cannot be created
/// or a subscriber is already installed, this returns without effect.
///
/// # Example
///
/// ```rust
/// use boostfocus::observability::init_tracing;
/// use boostfocus::Config;
///
/// init_tracing(&Config::default());
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(crate::infrastructure::get_data_dir);
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", "boostfocus"),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = create_tracer_provider(data_dir.join(TRACE_FILE), RotationPolicy::default(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
