use crate::record::Record;
use async_trait::async_trait;
use std::error::Error;

/// Asynchronous destination for [`Record`]s accepted by the logger.
///
/// Implementations are responsible for transporting records to a concrete
/// destination (console, memory buffer, remote service, etc). The logger
/// calls `send` from a background task and never awaits it on the
/// application thread.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Send a single record to the underlying destination.
    ///
    /// **Parameters**
    /// - `record`: fully-stamped [`Record`] produced by the logger.
    ///
    /// **Returns**
    /// - `Ok(())` if the record was accepted by the destination.
    /// - `Err(..)` if the destination failed (I/O error, serialization
    ///   error, etc.). The logger will treat this as a transient failure
    ///   and retry the batch with backoff.
    ///
    /// This method is called from a Tokio task that owns the batching
    /// loop. Implementations should strive to be non-blocking and use
    /// async I/O under the hood.
    async fn send(&self, record: &Record) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Flush any buffered records, if the destination implements buffering.
    ///
    /// **Returns**
    /// - `Ok(())` if all local buffers were successfully flushed.
    /// - `Err(..)` if the destination reported an error during flush.
    ///
    /// Default implementation is a no-op.
    async fn flush(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
