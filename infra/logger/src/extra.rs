//! Plain text lines with the event's structured fields appended as JSON.
//!
//! ```text
//! INFO chamber::auth: Login accepted --- {"action":"login","user_id":123}
//! ```

use serde_json::{Map, Value};
use std::error::Error;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const SEPARATOR: &str = " --- ";
const MESSAGE: &str = "message";
const EXCEPTION: &str = "exception";

/// Event formatter writing `LEVEL target: message --- {extra json}`.
///
/// Every field other than `message` goes into the JSON object. The first field recorded
/// as `&dyn Error` lands under `"exception"` as `{"field", "value", "chain"}`, where
/// `chain` lists the displays of its sources; further error fields stay under their own
/// names. A `dyn Error` carries no type name, so there is no `"type"` entry. Events
/// without extra fields get no suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtraJson;

impl<S, N> FormatEvent<S, N> for ExtraJson
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut fields = ExtraFields::default();
        event.record(&mut fields);

        write!(writer, "{} {}: {}", meta.level(), meta.target(), fields.message)?;
        if !fields.extra.is_empty() {
            let json = serde_json::to_string(&fields.extra).map_err(|_| fmt::Error)?;
            write!(writer, "{SEPARATOR}{json}")?;
        }
        writeln!(writer)
    }
}

#[derive(Debug, Default)]
struct ExtraFields {
    message: String,
    extra: Map<String, Value>,
}

impl ExtraFields {
    fn insert(&mut self, field: &Field, value: Value) {
        self.extra.insert(field.name().to_owned(), value);
    }
}

impl Visit for ExtraFields {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == MESSAGE {
            value.clone_into(&mut self.message);
        } else {
            self.insert(field, Value::from(value));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn Error + 'static)) {
        let mut chain = Vec::new();
        let mut cause = value.source();
        while let Some(err) = cause {
            chain.push(Value::from(err.to_string()));
            cause = err.source();
        }

        let mut exception = Map::new();
        exception.insert("field".to_owned(), Value::from(field.name()));
        exception.insert("value".to_owned(), Value::from(value.to_string()));
        exception.insert("chain".to_owned(), Value::Array(chain));

        // Later errors on the same event keep their own field name.
        let key = if self.extra.contains_key(EXCEPTION) { field.name() } else { EXCEPTION };
        self.extra.insert(key.to_owned(), Value::Object(exception));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == MESSAGE {
            self.message = format!("{value:?}");
        } else {
            self.insert(field, Value::from(format!("{value:?}")));
        }
    }
}
