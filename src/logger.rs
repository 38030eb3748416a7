use crate::config::LoggerConfig;
use crate::console::ConsoleSink;
use crate::error::LoggerError;
use crate::record::Record;
use crate::sink::RecordSink;
use chrono::Utc;
use serde_json::Value;
use std::error::Error;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep, Duration};

/// Structured object logger.
///
/// Accepts open key-valued [`Record`]s and ships them to a [`RecordSink`]
/// via a bounded channel and a background task, so `log` is synchronous
/// and non-blocking from the caller's perspective. The logger stays
/// usable for the whole process lifetime: a call deferred through a timer
/// needs no re-initialization.
///
/// Cloning is cheap; clones share the queue, the sequence counter and the
/// delivery task.
#[derive(Clone)]
pub struct StructuredLogger {
    sender: mpsc::Sender<Command>,
    seq: Arc<AtomicU64>,
    counters: Arc<Counters>,
    filter: Arc<crate::filter::DebugFilter>,
    filter_enabled: bool,
    namespace: String,
}

enum Command {
    Emit(Record),
    Flush(oneshot::Sender<()>),
    Shutdown(oneshot::Sender<()>),
}

#[derive(Default)]
struct Counters {
    total: AtomicU64,
    enqueued: AtomicU64,
    dropped: AtomicU64,
    filtered: AtomicU64,
}

/// Snapshot of the logger's telemetry counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerStats {
    /// Records handed to `log`/`try_log`, before any filtering.
    pub total: u64,
    /// Successfully enqueued into the channel.
    pub enqueued: u64,
    /// Dropped because the channel was full or closed.
    pub dropped: u64,
    /// Suppressed by the namespace filter.
    pub filtered: u64,
}

impl StructuredLogger {
    /// Create a logger with default behavior: configuration from the
    /// process environment (`DEBUG`, `OBJECT_LOG_NAMESPACE`) and a
    /// [`ConsoleSink`] writing JSON lines to stderr.
    ///
    /// Must be called within a Tokio runtime, since the delivery task is
    /// spawned here.
    pub fn new() -> Self {
        Self::with_config(Arc::new(ConsoleSink::stderr()), LoggerConfig::from_env())
    }

    /// Create a logger with an explicit sink and default configuration.
    pub fn with_sink(sink: Arc<dyn RecordSink>) -> Self {
        Self::with_config(sink, LoggerConfig::default())
    }

    /// Create a logger with an explicit sink and configuration, and spawn
    /// the background task that pulls [`Record`]s from the bounded channel
    /// and sends them to the sink.
    ///
    /// Minimal thresholds are enforced for `channel_buffer`, `batch_size`
    /// and `flush_interval` to avoid degenerate configurations.
    pub fn with_config(sink: Arc<dyn RecordSink>, config: LoggerConfig) -> Self {
        // Enforce minimal thresholds to avoid degenerate configs.
        let buffer = config.channel_buffer.max(16);
        let batch_size = config.batch_size.max(1);
        let flush_interval = if config.flush_interval < Duration::from_millis(10) {
            Duration::from_millis(10)
        } else {
            config.flush_interval
        };

        let (tx, mut rx) = mpsc::channel::<Command>(buffer);
        let filter = Arc::new(config.filter);
        let filter_enabled = filter.enabled(&config.namespace);

        tokio::spawn(async move {
            let mut batch = Vec::with_capacity(batch_size);
            let backoff = Duration::from_millis(100);
            let max_backoff = Duration::from_secs(10);

            loop {
                tokio::select! {
                    cmd = rx.recv() => match cmd {
                        Some(Command::Emit(record)) => {
                            batch.push(record);
                            if batch.len() >= batch_size {
                                if let Err(e) = send_batch(&*sink, &mut batch, backoff, max_backoff).await {
                                    eprintln!("error sending record batch: {}", e);
                                }
                            }
                        }
                        Some(Command::Flush(ack)) => {
                            if let Err(e) = drain(&*sink, &mut batch, backoff, max_backoff).await {
                                eprintln!("error flushing record batch: {}", e);
                            }
                            let _ = ack.send(());
                        }
                        Some(Command::Shutdown(ack)) => {
                            // Close before acking so senders observe the
                            // shutdown as soon as `shutdown()` returns.
                            rx.close();
                            if let Err(e) = drain(&*sink, &mut batch, backoff, max_backoff).await {
                                eprintln!("error flushing record batch: {}", e);
                            }
                            let _ = ack.send(());
                            break;
                        }
                        // All senders dropped; drain what is left and stop.
                        None => {
                            if let Err(e) = drain(&*sink, &mut batch, backoff, max_backoff).await {
                                eprintln!("error flushing record batch: {}", e);
                            }
                            break;
                        }
                    },
                    _ = sleep(flush_interval) => {
                        if !batch.is_empty() {
                            if let Err(e) = send_batch(&*sink, &mut batch, backoff, max_backoff).await {
                                eprintln!("error flushing record batch: {}", e);
                            }
                        }
                    }
                }
            }
        });

        Self {
            sender: tx,
            seq: Arc::new(AtomicU64::new(0)),
            counters: Arc::new(Counters::default()),
            filter,
            filter_enabled,
            namespace: config.namespace,
        }
    }

    /// Log a record.
    ///
    /// Stamps the record with the current time, the next sequence number
    /// and this logger's namespace, then enqueues it for delivery.
    /// Never blocks and never fails: a suppressed namespace or a full
    /// queue only bumps the corresponding counter.
    pub fn log(&self, record: impl Into<Record>) {
        self.counters.total.fetch_add(1, Ordering::Relaxed);
        if !self.filter_enabled {
            self.counters.filtered.fetch_add(1, Ordering::Relaxed);
            return;
        }

        let mut record = record.into();
        record.timestamp = Utc::now();
        record.seq = self.seq.fetch_add(1, Ordering::Relaxed);
        record.namespace = self.namespace.clone();

        if self.sender.try_send(Command::Emit(record)).is_err() {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            eprintln!("object-logger: queue full or closed, dropping record");
        } else {
            self.counters.enqueued.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Checked variant of [`log`](Self::log) for untyped JSON input.
    ///
    /// **Returns**
    /// - `Err(LoggerError::InvalidRecord)` if `value` is not a JSON object.
    /// - `Err(LoggerError::Closed)` if the logger was shut down.
    /// - `Ok(())` otherwise. A full queue still drops the record and bumps
    ///   the drop counter; backpressure is not an input error.
    pub fn try_log(&self, value: Value) -> Result<(), LoggerError> {
        let record = Record::from_value(value)?;
        if self.sender.is_closed() {
            return Err(LoggerError::Closed);
        }
        self.log(record);
        Ok(())
    }

    /// Derive a logger with a different namespace sharing this logger's
    /// queue, counters, sequence and filter. The filter is re-evaluated
    /// against the new namespace.
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        Self {
            sender: self.sender.clone(),
            seq: Arc::clone(&self.seq),
            counters: Arc::clone(&self.counters),
            filter: Arc::clone(&self.filter),
            filter_enabled: self.filter.enabled(&namespace),
            namespace,
        }
    }

    /// Wait until everything enqueued so far has been handed to the sink
    /// and the sink's own `flush` has completed.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(Command::Flush(ack)).await.is_ok() {
            let _ = done.await;
        }
    }

    /// Flush and stop the background task. Records logged afterwards are
    /// counted as dropped; `try_log` reports [`LoggerError::Closed`].
    pub async fn shutdown(&self) {
        let (ack, done) = oneshot::channel();
        if self.sender.send(Command::Shutdown(ack)).await.is_ok() {
            let _ = done.await;
        }
    }

    /// Snapshot the telemetry counters.
    pub fn stats(&self) -> LoggerStats {
        LoggerStats {
            total: self.counters.total.load(Ordering::Relaxed),
            enqueued: self.counters.enqueued.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
            filtered: self.counters.filtered.load(Ordering::Relaxed),
        }
    }

    /// Namespace stamped on records accepted by this handle.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl Default for StructuredLogger {
    fn default() -> Self {
        StructuredLogger::new()
    }
}

/// Send the whole batch, then ask the sink to flush its own buffers.
async fn drain(
    sink: &dyn RecordSink,
    batch: &mut Vec<Record>,
    backoff: Duration,
    max_backoff: Duration,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    if !batch.is_empty() {
        send_batch(sink, batch, backoff, max_backoff).await?;
    }
    sink.flush().await
}

async fn send_batch(
    sink: &dyn RecordSink,
    batch: &mut Vec<Record>,
    mut backoff: Duration,
    max_backoff: Duration,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    loop {
        let mut last_err: Option<Box<dyn Error + Send + Sync>> = None;
        for record in batch.iter() {
            if let Err(e) = sink.send(record).await {
                last_err = Some(e);
                break;
            }
        }

        if last_err.is_none() {
            batch.clear();
            return Ok(());
        }

        eprintln!("record sink send failed, retrying in {:?}", backoff);
        sleep(backoff).await;
        backoff = std::cmp::min(backoff * 2, max_backoff);
    }
}
