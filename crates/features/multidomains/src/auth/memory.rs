use super::UserStore;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

#[chamber_derive::chamber_error]
pub enum StoreError {
    #[error("Unknown user model '{model}'{}", format_context(.context))]
    UnknownModel { model: String, context: Option<Cow<'static, str>> },

    #[error("User model '{model}' has no field '{field}'{}", format_context(.context))]
    UnknownField { model: String, field: String, context: Option<Cow<'static, str>> },
}

/// A user row, possibly with some fields left unloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pk: u64,
    model: String,
    fields: BTreeMap<String, Value>,
    deferred: BTreeSet<String>,
}

impl UserRecord {
    #[must_use]
    pub const fn pk(&self) -> u64 {
        self.pk
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Value of a loaded field; `None` for deferred or unknown fields.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    #[must_use]
    pub fn is_loaded(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Fields that were not loaded by the fetch.
    #[must_use]
    pub const fn deferred_fields(&self) -> &BTreeSet<String> {
        &self.deferred
    }
}

#[derive(Debug, Default)]
struct Table {
    fields: Vec<String>,
    rows: BTreeMap<u64, BTreeMap<String, Value>>,
    next_pk: u64,
}

impl Table {
    fn check_field(&self, model: &str, field: &str) -> Result<(), StoreError> {
        if self.fields.iter().any(|f| f == field) {
            Ok(())
        } else {
            Err(StoreError::UnknownField {
                model: model.to_owned(),
                field: field.to_owned(),
                context: None,
            })
        }
    }
}

fn is_pk(column: &str) -> bool {
    column == "id" || column == "pk"
}

/// In-memory [`UserStore`] with one table per user model.
///
/// `id` and `pk` in a column list both mean the primary key, which is always loaded.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    tables: RwLock<FxHashMap<String, Table>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_model<I, S>(self, model: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register_model(model, fields);
        self
    }

    /// Declares a user model and its (non primary key) fields. Re-registering a
    /// model drops its rows.
    pub fn register_model<I, S>(&self, model: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).filter(|f| !is_pk(f)).collect();
        self.tables.write().insert(model.into(), Table { fields, rows: BTreeMap::new(), next_pk: 1 });
    }

    /// Inserts a row and returns it fully loaded. Omitted fields are `null`.
    ///
    /// # Errors
    /// Unknown model or field.
    pub fn create<I, K>(&self, model: &str, values: I) -> Result<UserRecord, StoreError>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(model)
            .ok_or_else(|| StoreError::UnknownModel { model: model.to_owned(), context: None })?;

        let mut row: BTreeMap<String, Value> =
            table.fields.iter().map(|f| (f.clone(), Value::Null)).collect();
        for (field, value) in values {
            let field = field.into();
            table.check_field(model, &field)?;
            row.insert(field, value);
        }

        let pk = table.next_pk;
        table.next_pk += 1;
        table.rows.insert(pk, row.clone());
        trace!(model, pk, "Created user");

        Ok(UserRecord { pk, model: model.to_owned(), fields: row, deferred: BTreeSet::new() })
    }
}

impl UserStore for MemoryUserStore {
    type Key = u64;
    type User = UserRecord;
    type Error = StoreError;

    fn fetch(
        &self,
        user_model: &str,
        pk: &u64,
        only: Option<&[String]>,
    ) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read();
        let table = tables.get(user_model).ok_or_else(|| StoreError::UnknownModel {
            model: user_model.to_owned(),
            context: None,
        })?;

        if let Some(columns) = only {
            for column in columns.iter().filter(|c| !is_pk(c)) {
                table.check_field(user_model, column)?;
            }
        }

        let Some(row) = table.rows.get(pk) else {
            return Ok(None);
        };

        let mut fields = BTreeMap::new();
        let mut deferred = BTreeSet::new();
        for (field, value) in row {
            if only.is_none_or(|columns| columns.contains(field)) {
                fields.insert(field.clone(), value.clone());
            } else {
                deferred.insert(field.clone());
            }
        }

        Ok(Some(UserRecord { pk: *pk, model: user_model.to_owned(), fields, deferred }))
    }
}
