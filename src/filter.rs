/// Namespace filter compatible with the `DEBUG` environment variable
/// convention used by debug-style loggers.
///
/// A filter spec is a comma- or space-separated list of patterns:
/// - `*` matches every namespace;
/// - a pattern with a trailing `*` matches any namespace with that prefix
///   (`app:*` matches `app:db`);
/// - any other pattern matches exactly;
/// - a leading `-` turns the pattern into an exclusion, and exclusions win
///   over inclusions (`*,-app:noisy`).
///
/// An empty spec matches nothing, so an unset `DEBUG` variable disables
/// emission entirely.
#[derive(Clone, Debug, Default)]
pub struct DebugFilter {
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl DebugFilter {
    /// Parse a filter spec string.
    pub fn parse(spec: &str) -> Self {
        let mut includes = Vec::new();
        let mut excludes = Vec::new();

        for raw in spec.split([',', ' ']) {
            let pattern = raw.trim();
            if pattern.is_empty() {
                continue;
            }
            if let Some(rest) = pattern.strip_prefix('-') {
                if !rest.is_empty() {
                    excludes.push(rest.to_string());
                }
            } else {
                includes.push(pattern.to_string());
            }
        }

        DebugFilter { includes, excludes }
    }

    /// Build a filter from the `DEBUG` environment variable.
    ///
    /// This is the only place the filter touches ambient process state;
    /// the parsed filter is plain owned data afterwards.
    pub fn from_env() -> Self {
        DebugFilter::parse(&crate::env::env_or(crate::env::DEBUG_ENV, ""))
    }

    /// Filter that matches every namespace.
    pub fn all() -> Self {
        DebugFilter::parse("*")
    }

    /// Decide whether a logger with the given namespace should emit.
    pub fn enabled(&self, namespace: &str) -> bool {
        if self.excludes.iter().any(|p| matches(p, namespace)) {
            return false;
        }
        self.includes.iter().any(|p| matches(p, namespace))
    }
}

fn matches(pattern: &str, namespace: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    if let Some(prefix) = pattern.strip_suffix('*') {
        return namespace.starts_with(prefix);
    }
    namespace == pattern
}
