//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → OTLP JSON lines
//! ```
//!
//! Spans are written to `~/.local/share/zellij/xbps-browse/xbps-browse-otlp.json`,
//! rotated at 10 MiB with three timestamped backups. The filter comes from the
//! `trace_level` plugin option and defaults to `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: File span exporter and tracer provider
//! - `otlp`: OTLP JSON encoding
//! - `file_writer`: Size-rotated line writer

mod exporter;
mod file_writer;
pub mod init;
mod otlp;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, TRACE_FILE_NAME};
