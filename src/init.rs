use crate::layer::ObjectLogLayer;
use crate::logger::StructuredLogger;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Install the given logger as the global `tracing` subscriber.
///
/// **Parameters**
/// - `logger`: [`StructuredLogger`] that will receive every `tracing`
///   event as a [`Record`](crate::record::Record).
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt` layer is
///   stacked on top so events are also printed to the console.
///
/// **Effects**
///
/// This installs a [`Registry`] combined with [`ObjectLogLayer`] as the
/// global default subscriber, so all `tracing` events in the process are
/// forwarded to the logger. Panics if a global subscriber is already set.
pub fn init_tracing_with_config(logger: StructuredLogger, enable_stdout: bool) {
    let layer = ObjectLogLayer::new(logger);

    if enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber).expect("set global subscriber");
    }
}

/// Initialize tracing with sensible defaults.
///
/// Equivalent to calling [`init_tracing_with_config`] with console echo
/// disabled; the logger's own sink is the single destination.
pub fn init_tracing(logger: StructuredLogger) {
    init_tracing_with_config(logger, false);
}
