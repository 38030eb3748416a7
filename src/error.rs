/// Errors surfaced by the checked logging entry points.
///
/// The fire-and-forget [`log`](crate::logger::StructuredLogger::log) path
/// never returns these; only [`try_log`](crate::logger::StructuredLogger::try_log)
/// reports them.
#[derive(thiserror::Error, Debug)]
pub enum LoggerError {
    /// The supplied value is not an open key-valued mapping.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The logger was shut down and no longer accepts records.
    #[error("logger is shut down")]
    Closed,
}
