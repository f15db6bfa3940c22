//! Tracing subscriber setup.

use super::exporter;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "xbps-browse";

/// Trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "xbps-browse-otlp.json";

/// Filter used when none is configured or the configured one is invalid.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber exporting spans to
/// `~/.local/share/zellij/xbps-browse/xbps-browse-otlp.json`.
///
/// `config.trace_level` accepts any `EnvFilter` directive, e.g.
/// `"xbps_browse=debug"`.
///
/// Returns `false` when tracing stays off: the data directory could not be
/// created, or a subscriber is already installed. Browsing works either way.
pub fn init_tracing(config: &Config) -> bool {
    let data_dir = paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let filter = config
        .trace_level
        .as_deref()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("xbps.origin", config.origin.to_string()),
    ]);
    let provider = exporter::tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok()
}
