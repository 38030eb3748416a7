use crate::record::Record;
use crate::sink::RecordSink;
use async_trait::async_trait;
use std::error::Error;

/// Which standard stream the console sink writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Sink that writes each record as one JSON line to stdout or stderr.
///
/// Stderr is the default, the conventional destination for debug-style
/// loggers, leaving stdout to the application itself.
#[derive(Clone)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    pub fn new(stream: ConsoleStream) -> Self {
        ConsoleSink { stream }
    }

    pub fn stdout() -> Self {
        ConsoleSink::new(ConsoleStream::Stdout)
    }

    pub fn stderr() -> Self {
        ConsoleSink::new(ConsoleStream::Stderr)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        ConsoleSink::stderr()
    }
}

#[async_trait]
impl RecordSink for ConsoleSink {
    async fn send(&self, record: &Record) -> Result<(), Box<dyn Error + Send + Sync>> {
        let line = serde_json::to_string(record)?;
        match self.stream {
            ConsoleStream::Stdout => println!("{}", line),
            ConsoleStream::Stderr => eprintln!("{}", line),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_to_either_stream() {
        let record = Record::new().field("number", 3);
        ConsoleSink::stdout().send(&record).await.expect("stdout send");
        ConsoleSink::stderr().send(&record).await.expect("stderr send");
    }
}
