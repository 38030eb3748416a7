use tokio::time::{sleep, Duration};

use object_logger::init::init_tracing;
use object_logger::logger::StructuredLogger;
use object_logger::record::Record;

#[tokio::main]
async fn main() {
    // Enable all namespaces, then build a logger with default behavior:
    // env-derived config and a JSON-lines console sink on stderr.
    std::env::set_var("DEBUG", "*");

    let logger = StructuredLogger::new();
    init_tracing(logger.clone());

    logger.log(Record::new().field("data", "somedata here").field("warning", "no warning"));
    logger.log(Record::new().field("something", "else"));
    logger.log(Record::new().field("number", 3));

    let delayed = logger.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(400)).await;
        delayed.log(Record::new().field("afterTimeout", true));
    });

    // Events from already-instrumented code take the same path.
    tracing::info!(number = 3, "direct tracing event");

    sleep(Duration::from_millis(600)).await;
    logger.flush().await;
}
