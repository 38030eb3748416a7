use std::sync::Arc;
use std::time::Instant;
use tokio::time::{sleep, Duration};

use object_logger::logger::StructuredLogger;
use object_logger::noop_sink::NoopSink;
use object_logger::record::Record;

#[tokio::main]
async fn main() {
    let logger = StructuredLogger::with_sink(Arc::new(NoopSink::default()));

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        logger.log(Record::new().field("iteration", i));
    }

    let elapsed = start.elapsed();
    println!("default config: logged {} records in {:?} (~{:.0} rec/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );

    // Give the background task a little time to drain the queue.
    sleep(Duration::from_secs(2)).await;

    let stats = logger.stats();
    println!("total={} enqueued={} dropped={}", stats.total, stats.enqueued, stats.dropped);
}
