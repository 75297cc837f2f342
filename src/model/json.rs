/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/10/26
******************************************************************************/

//! Path-addressed, lenient access into JSON response documents
//!
//! Every resource decoder reads its fields through [`JsonField`]. A lookup never fails:
//! a missing path yields the zero value of the requested type (empty string, `0`,
//! `false`, no timestamp, empty list). Paths are dot separated (`data.items`) and
//! numeric segments index into arrays (`data.items.0`).

use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Types that can be decoded from a single JSON node
///
/// Decoding is total: implementations must produce a value for any input,
/// falling back to zero values for anything absent or malformed.
pub trait FromJson: Sized {
    /// Builds the value from the given node
    fn from_json(node: JsonField<'_>) -> Self;
}

/// A possibly-missing node inside a JSON document
#[derive(Debug, Clone, Copy)]
pub struct JsonField<'a> {
    value: Option<&'a Value>,
}

impl<'a> JsonField<'a> {
    /// Wraps the root of a document
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    /// A node that does not exist
    #[must_use]
    pub fn missing() -> Self {
        Self { value: None }
    }

    /// Looks up a dot separated path relative to this node
    #[must_use]
    pub fn get(&self, path: &str) -> JsonField<'a> {
        if path.is_empty() {
            return *self;
        }
        let value = self.value.and_then(|root| {
            path.split('.').try_fold(root, |current, segment| match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            })
        });
        Self { value }
    }

    /// Whether the node is present and not `null`
    #[must_use]
    pub fn exists(&self) -> bool {
        !matches!(self.value, None | Some(Value::Null))
    }

    /// The underlying JSON value, if present
    #[must_use]
    pub fn raw(&self) -> Option<&'a Value> {
        self.value
    }

    /// String value; numbers and booleans are rendered as text
    #[must_use]
    pub fn string(self) -> String {
        match self.value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(v @ (Value::Array(_) | Value::Object(_))) => v.to_string(),
            Some(Value::Null) | None => String::new(),
        }
    }

    /// Floating point value; numeric strings are parsed
    #[must_use]
    pub fn float(self) -> f64 {
        match self.value {
            Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or_default(),
            Some(Value::Bool(true)) => 1.0,
            _ => 0.0,
        }
    }

    /// Integer value; floats are truncated and numeric strings are parsed
    #[must_use]
    pub fn int(self) -> i64 {
        match self.value {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or_default(),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                    .unwrap_or_default()
            }
            Some(Value::Bool(true)) => 1,
            _ => 0,
        }
    }

    /// Boolean value; accepts JSON booleans, `"true"`/`"false"` strings and non-zero numbers
    #[must_use]
    pub fn boolean(self) -> bool {
        match self.value {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1"),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            _ => false,
        }
    }

    /// Timestamp value
    ///
    /// Accepts RFC 3339 strings and plain `YYYY-MM-DD` dates (read as midnight UTC).
    /// Anything else yields `None`.
    #[must_use]
    pub fn time(self) -> Option<DateTime<Utc>> {
        let Some(Value::String(s)) = self.value else {
            return None;
        };
        let s = s.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Child nodes, in document order
    ///
    /// A missing or `null` node has no children; any other non-array node is
    /// treated as a single-element list.
    #[must_use]
    pub fn array(self) -> Vec<JsonField<'a>> {
        match self.value {
            Some(Value::Array(items)) => items.iter().map(JsonField::new).collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => vec![JsonField::new(other)],
        }
    }

    /// Child nodes of a list that must be an array when present
    ///
    /// # Errors
    /// Returns [`AppError::Decode`] when the node exists but is not an array.
    pub fn items(self) -> Result<Vec<JsonField<'a>>, AppError> {
        match self.value {
            Some(Value::Array(items)) => Ok(items.iter().map(JsonField::new).collect()),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(AppError::Decode(format!(
                "expected a list of items, found {}",
                kind_of(other)
            ))),
        }
    }

    /// Decodes this node with the target type's decoder
    #[must_use]
    pub fn decode<T: FromJson>(self) -> T {
        T::from_json(self)
    }

    /// Decodes every child node, preserving document order
    #[must_use]
    pub fn list<T: FromJson>(self) -> Vec<T> {
        self.array().into_iter().map(T::from_json).collect()
    }

    /// Decodes this node only if it is present
    #[must_use]
    pub fn optional<T: FromJson>(self) -> Option<T> {
        self.exists().then(|| T::from_json(self))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Declares the decode table of an entity
///
/// Each line maps a struct field to a JSON path (relative to the entity's node) and a
/// coercion taking a [`JsonField`]. The usual coercions are `JsonField::string`,
/// `JsonField::float`, `JsonField::int`, `JsonField::boolean`, `JsonField::time`,
/// `JsonField::decode::<T>` and `JsonField::list::<T>`.
///
/// ```ignore
/// impl_from_json!(Lot {
///     id: "id" => JsonField::string,
///     quantity: "quantity" => JsonField::float,
///     executed_at: "executed-at" => JsonField::time,
/// });
/// ```
#[macro_export]
macro_rules! impl_from_json {
    ($ty:ident { $($field:ident : $path:literal => $coerce:expr),* $(,)? }) => {
        impl $crate::model::json::FromJson for $ty {
            fn from_json(node: $crate::model::json::JsonField<'_>) -> Self {
                Self {
                    $($field: ($coerce)(node.get($path)),)*
                }
            }
        }
    };
}
