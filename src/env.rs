/// Environment variable names used by this crate for convenient
/// configuration of loggers from services.
///
/// These are purely helpers; the core logger types remain decoupled from
/// environment access and only the `from_env` constructors read them.

/// Namespace filter spec, e.g. `*` or `app:*,-app:noisy`.
pub const DEBUG_ENV: &str = "DEBUG";

/// Default namespace for loggers built via [`crate::config::LoggerConfig::from_env`].
pub const NAMESPACE_ENV: &str = "OBJECT_LOG_NAMESPACE";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
