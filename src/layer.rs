use crate::logger::StructuredLogger;
use crate::record::Record;
use std::collections::BTreeMap;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that forwards events into a
/// [`StructuredLogger`], so a service already instrumented with `tracing`
/// can route its events through the same sinks as directly-logged
/// records.
///
/// Event fields become record fields; the `message` field, the level and
/// the target are carried as `message`, `level` and `target` entries.
/// Filtering stays with the logger's namespace filter, so every event is
/// forwarded here.
pub struct ObjectLogLayer {
    logger: StructuredLogger,
}

impl ObjectLogLayer {
    pub fn new(logger: StructuredLogger) -> Self {
        ObjectLogLayer { logger }
    }
}

impl<S> Layer<S> for ObjectLogLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event, _ctx: Context<'_, S>) {
        let mut fields = BTreeMap::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor { fields: &mut fields, message: &mut message };
        event.record(&mut visitor);

        let meta = event.metadata();
        fields.insert(
            "level".to_string(),
            serde_json::Value::String(meta.level().to_string()),
        );
        fields.insert(
            "target".to_string(),
            serde_json::Value::String(meta.target().to_string()),
        );
        if let Some(message) = message {
            fields.insert("message".to_string(), serde_json::Value::String(message));
        }

        self.logger.log(Record::from(fields));
    }
}

use tracing::field::{Field, Visit};

struct FieldVisitor<'a> {
    fields: &'a mut BTreeMap<String, serde_json::Value>,
    message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), serde_json::Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), serde_json::Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.fields.insert(field.name().to_string(), serde_json::Value::String(format!("{:?}", value)));
        }
    }
}
