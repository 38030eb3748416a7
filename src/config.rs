use tokio::time::Duration;

use crate::env::{env_or, NAMESPACE_ENV};
use crate::filter::DebugFilter;

/// Configuration of a [`StructuredLogger`](crate::logger::StructuredLogger).
///
/// Controls the size of the internal queue, the maximum batch handed to the
/// sink in one go, how often a partial batch is force-flushed, and which
/// namespaces emit at all.
///
/// **Fields**
/// - `channel_buffer`: maximum number of [`Record`](crate::record::Record)s
///   queued before new records are dropped.
/// - `batch_size`: batch size for delivery to the sink.
/// - `flush_interval`: maximum interval between flushes even when a batch
///   is not full.
/// - `namespace`: namespace stamped on every accepted record.
/// - `filter`: [`DebugFilter`] deciding whether this namespace emits.
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    pub channel_buffer: usize,
    pub batch_size: usize,
    pub flush_interval: Duration,
    pub namespace: String,
    pub filter: DebugFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 1024,
            batch_size: 128,
            flush_interval: Duration::from_secs(1),
            namespace: "app".to_string(),
            filter: DebugFilter::all(),
        }
    }
}

impl LoggerConfig {
    /// Build a config from the process environment.
    ///
    /// Reads the `DEBUG` filter spec and the optional
    /// `OBJECT_LOG_NAMESPACE` variable; everything else keeps the
    /// defaults. This is the single point where ambient environment state
    /// enters the logger; the resulting config is plain owned data.
    pub fn from_env() -> Self {
        Self {
            filter: DebugFilter::from_env(),
            namespace: env_or(NAMESPACE_ENV, "app"),
            ..Self::default()
        }
    }
}
