use std::error::Error;
use std::sync::Arc;
use serde_json::json;
use tokio::sync::Notify;
use tokio::time::{sleep, Duration};

use object_logger::config::LoggerConfig;
use object_logger::error::LoggerError;
use object_logger::filter::DebugFilter;
use object_logger::layer::ObjectLogLayer;
use object_logger::logger::StructuredLogger;
use object_logger::memory::MemorySink;
use object_logger::record::Record;
use object_logger::sink::RecordSink;

fn memory_logger() -> (StructuredLogger, MemorySink) {
    let sink = MemorySink::new();
    let logger = StructuredLogger::with_sink(Arc::new(sink.clone()));
    (logger, sink)
}

/// Sink whose `send` never completes, so the delivery task stalls and
/// the queue fills up.
struct StalledSink {
    gate: Notify,
}

#[async_trait::async_trait]
impl RecordSink for StalledSink {
    async fn send(&self, _record: &Record) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.gate.notified().await;
        Ok(())
    }
}

#[tokio::test]
async fn constructing_with_no_arguments_yields_usable_logger() {
    let logger = StructuredLogger::new();
    logger.log(Record::new().field("data", "somedata here").field("warning", "no warning"));
    logger.flush().await;
    assert_eq!(logger.stats().total, 1);
}

#[tokio::test]
async fn logs_are_independent_and_delivered_in_order() {
    let (logger, sink) = memory_logger();

    logger.log(Record::new().field("data", "somedata here").field("warning", "no warning"));
    logger.log(Record::new().field("something", "else"));
    logger.log(Record::new().field("number", 3));
    logger.flush().await;

    let records = sink.records().await;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].fields["data"], json!("somedata here"));
    assert_eq!(records[0].fields["warning"], json!("no warning"));
    assert_eq!(records[1].fields["something"], json!("else"));
    assert_eq!(records[2].fields["number"], json!(3));

    // Later records do not inherit fields from earlier ones.
    assert!(!records[1].fields.contains_key("data"));
    assert_eq!(records.iter().map(|r| r.seq).collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn delayed_log_needs_no_extra_setup() {
    let (logger, sink) = memory_logger();

    logger.log(Record::new().field("data", "somedata here").field("warning", "no warning"));
    logger.log(Record::new().field("something", "else"));
    logger.log(Record::new().field("number", 3));

    let delayed = logger.clone();
    let timer = tokio::spawn(async move {
        sleep(Duration::from_millis(400)).await;
        delayed.log(Record::new().field("afterTimeout", true));
    });
    timer.await.expect("timer task");
    logger.flush().await;

    let records = sink.records().await;
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].fields["afterTimeout"], json!(true));
    assert!(records[3].timestamp >= records[2].timestamp);
}

#[tokio::test]
async fn same_record_twice_produces_two_independent_emissions() {
    let (logger, sink) = memory_logger();

    let record = Record::new().field("number", 3);
    logger.log(record.clone());
    logger.log(record);
    logger.flush().await;

    let records = sink.records().await;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].fields, records[1].fields);
    assert_ne!(records[0].seq, records[1].seq);
}

#[tokio::test(start_paused = true)]
async fn partial_batches_flush_on_the_interval() {
    let sink = MemorySink::new();
    let config = LoggerConfig {
        batch_size: 1000,
        flush_interval: Duration::from_millis(100),
        ..LoggerConfig::default()
    };
    let logger = StructuredLogger::with_config(Arc::new(sink.clone()), config);

    logger.log(Record::new().field("something", "else"));
    sleep(Duration::from_millis(250)).await;

    assert_eq!(sink.len().await, 1);
}

#[tokio::test]
async fn try_log_rejects_non_object_input() {
    let (logger, sink) = memory_logger();

    assert!(matches!(logger.try_log(json!(3)), Err(LoggerError::InvalidRecord(_))));
    assert!(matches!(logger.try_log(json!("text")), Err(LoggerError::InvalidRecord(_))));
    logger.try_log(json!({"number": 3})).expect("object input");
    logger.flush().await;

    assert_eq!(sink.len().await, 1);
}

#[tokio::test]
async fn shutdown_drains_then_closes() {
    let (logger, sink) = memory_logger();

    logger.log(Record::new().field("data", "somedata here"));
    logger.shutdown().await;
    assert_eq!(sink.len().await, 1);

    assert!(matches!(logger.try_log(json!({"late": true})), Err(LoggerError::Closed)));

    // The fire-and-forget path just counts the record as dropped.
    logger.log(Record::new().field("late", true));
    assert_eq!(logger.stats().dropped, 1);
    assert_eq!(sink.len().await, 1);
}

#[tokio::test]
async fn full_queue_drops_records_and_counts_them() {
    let config = LoggerConfig {
        channel_buffer: 16,
        batch_size: 1,
        ..LoggerConfig::default()
    };
    let sink = Arc::new(StalledSink { gate: Notify::new() });
    let logger = StructuredLogger::with_config(sink, config);

    // The sink never completes a send, so once the queue is full every
    // further record is dropped instead of blocking the caller.
    for i in 0..64u64 {
        logger.log(Record::new().field("iteration", i));
    }

    let stats = logger.stats();
    assert_eq!(stats.total, 64);
    assert!(stats.dropped > 0);
    assert_eq!(stats.enqueued + stats.dropped, 64);
    assert_eq!(stats.filtered, 0);
}

#[tokio::test]
async fn disabled_namespace_suppresses_emission() {
    let sink = MemorySink::new();
    let config = LoggerConfig {
        filter: DebugFilter::parse("app:*"),
        namespace: "worker".to_string(),
        ..LoggerConfig::default()
    };
    let logger = StructuredLogger::with_config(Arc::new(sink.clone()), config);

    logger.log(Record::new().field("data", "somedata here"));
    logger.log(Record::new().field("something", "else"));
    logger.flush().await;

    assert!(sink.is_empty().await);
    let stats = logger.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.filtered, 2);
    assert_eq!(stats.enqueued, 0);
}

#[tokio::test]
async fn derived_namespace_reapplies_the_filter() {
    let sink = MemorySink::new();
    let config = LoggerConfig {
        filter: DebugFilter::parse("app:*"),
        namespace: "app:db".to_string(),
        ..LoggerConfig::default()
    };
    let logger = StructuredLogger::with_config(Arc::new(sink.clone()), config);
    let muted = logger.with_namespace("worker");

    logger.log(Record::new().field("data", "somedata here"));
    muted.log(Record::new().field("ignored", true));
    logger.flush().await;

    let records = sink.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].namespace, "app:db");
    assert_eq!(muted.namespace(), "worker");
    assert_eq!(logger.stats().filtered, 1);
}

#[tokio::test]
async fn tracing_events_flow_into_the_sink() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    let (logger, sink) = memory_logger();
    let subscriber = Registry::default().with(ObjectLogLayer::new(logger.clone()));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(user_id = 42, retried = false, "authentication succeeded");
    });
    logger.flush().await;

    let records = sink.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].fields["user_id"], json!(42));
    assert_eq!(records[0].fields["retried"], json!(false));
    assert_eq!(records[0].fields["message"], json!("authentication succeeded"));
    assert_eq!(records[0].fields["level"], json!("INFO"));
}

#[tokio::test]
async fn config_from_env_picks_up_filter_and_namespace() {
    std::env::set_var("DEBUG", "svc:*");
    std::env::set_var("OBJECT_LOG_NAMESPACE", "svc:auth");

    let config = LoggerConfig::from_env();
    assert_eq!(config.namespace, "svc:auth");
    assert!(config.filter.enabled("svc:auth"));
    assert!(!config.filter.enabled("other"));

    std::env::remove_var("DEBUG");
    std::env::remove_var("OBJECT_LOG_NAMESPACE");
}
