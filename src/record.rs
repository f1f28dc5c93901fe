//! Export records.
//!
//! A [`Record`] is one row of export data: an **ordered** mapping from column
//! name to a scalar text value. Column order is insertion order and is what the
//! writers use to derive header order.
//!
//! Records are usually built by the data-retrieval side of an export, either
//! directly with [`Record::with`] / [`FromIterator`], or from any Serde value
//! via [`Record::from_serialize`].

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

/// One row of export data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set `column` to `value`.
    ///
    /// A new column is appended at the end. An existing column keeps its
    /// position and the previous value is returned.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((column, value));
                None
            }
        }
    }

    /// Value stored under `column`, if any.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from any value that serializes to a JSON object.
    ///
    /// Columns follow the serializer's field order (struct declaration order
    /// for derived `Serialize`). See [`Record::from_json`] for how values are
    /// turned into text.
    ///
    /// # Errors
    /// Returns an error if `value` fails to serialize, is not an object, or
    /// holds a nested array/object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let json = serde_json::to_value(value).context("serialize export record")?;
        Self::from_json(json)
    }

    /// Build a record from a JSON object.
    ///
    /// * strings are kept as-is
    /// * numbers use their JSON text (`3`, `2.5`)
    /// * booleans become `true` / `false`
    /// * `null` becomes an empty string
    ///
    /// # Errors
    /// Returns an error if `value` is not an object or if any field holds an
    /// array or object.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            bail!("export record must be a JSON object, got {}", kind(&value));
        };
        let mut rec = Record::new();
        for (column, v) in map {
            let text = scalar_text(&v)
                .with_context(|| format!("column {column:?}"))?;
            rec.insert(column, text);
        }
        Ok(rec)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rec = Record::new();
        for (k, v) in iter {
            rec.insert(k, v);
        }
        rec
    }
}

fn scalar_text(v: &Value) -> Result<String> {
    Ok(match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => {
            bail!("nested {} values cannot be exported", kind(v))
        }
    })
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
