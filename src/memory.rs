use crate::record::Record;
use crate::sink::RecordSink;
use async_trait::async_trait;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Sink that keeps every record in memory.
///
/// Intended for tests and local inspection: clone the sink before handing
/// it to the logger, then read the captured records back through the
/// clone.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<Record>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }

    /// Snapshot of everything captured so far, in delivery order.
    pub async fn records(&self) -> Vec<Record> {
        self.records.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn send(&self, record: &Record) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}
