//! Row abstraction for the table engine.
//!
//! The engine is generic over row shape. Any type that can answer "what is the
//! value of field `key`" and "which fields do you have" can be searched, filtered,
//! sorted, paginated and exported.

use super::value::Value;
use std::collections::BTreeMap;

/// A row that exposes its fields by key.
///
/// Missing fields read as [`Value::Null`]. `field_names` determines the order of
/// fields for search and for export headers.
///
/// # Example
///
/// ```
/// use planboard::{Record, Value};
///
/// struct Indicator {
///     name: String,
///     current: f64,
/// }
///
/// impl Record for Indicator {
///     fn field(&self, key: &str) -> Option<Value> {
///         match key {
///             "name" => Some(Value::from(self.name.as_str())),
///             "current" => Some(Value::from(self.current)),
///             _ => None,
///         }
///     }
///
///     fn field_names(&self) -> Vec<String> {
///         vec!["name".to_string(), "current".to_string()]
///     }
/// }
///
/// let row = Indicator { name: "Eficiência".into(), current: 85.0 };
/// assert_eq!(row.value("current"), Value::Number(85.0));
/// assert_eq!(row.value("missing"), Value::Null);
/// ```
pub trait Record {
    /// Returns the value of `key`, or `None` if the row has no such field.
    fn field(&self, key: &str) -> Option<Value>;

    /// Returns the row's field names in display order.
    fn field_names(&self) -> Vec<String>;

    /// Returns the value of `key`, treating a missing field as `Null`.
    fn value(&self, key: &str) -> Value {
        self.field(key).unwrap_or_default()
    }

    /// Returns every field as `(name, value)` pairs in `field_names` order.
    fn entries(&self) -> Vec<(String, Value)> {
        self.field_names()
            .into_iter()
            .map(|name| {
                let value = self.value(&name);
                (name, value)
            })
            .collect()
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).map(Value::from)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

/// JSON objects are records; any other JSON value is a record without fields.
impl Record for serde_json::Value {
    fn field(&self, key: &str) -> Option<Value> {
        self.as_object().and_then(|map| map.field(key))
    }

    fn field_names(&self) -> Vec<String> {
        self.as_object().map_or_else(Vec::new, Record::field_names)
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }

    fn field_names(&self) -> Vec<String> {
        (**self).field_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_object_exposes_fields() {
        let row = json!({"nome": "Ciclo 2024-2027", "progresso": 45});
        assert_eq!(row.value("progresso"), Value::Number(45.0));
        assert_eq!(row.value("ausente"), Value::Null);
        assert_eq!(row.field_names().len(), 2);
    }

    #[test]
    fn non_object_json_has_no_fields() {
        let row = json!([1, 2, 3]);
        assert!(row.field_names().is_empty());
        assert_eq!(row.field("0"), None);
    }

    #[test]
    fn entries_follow_field_order() {
        let mut row = BTreeMap::new();
        row.insert("b".to_string(), Value::from("2"));
        row.insert("a".to_string(), Value::from("1"));
        let entries = row.entries();
        assert_eq!(entries[0].0, "a");
        assert_eq!(entries[1].1, Value::from("2"));
    }
}
