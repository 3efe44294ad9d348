//! Dynamically-typed cell values.
//!
//! Rows handed to the table engine can have any shape, so every field is read
//! through [`Value`]. Two views of a value matter to the engine:
//!
//! - its **text**, used by search, equality filters and the default renderer
//! - its **ordering**, used by the sort stage
//!
//! Both operate on the raw value, never on a column's rendered output.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A single field value read from a row.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Missing or explicitly null field.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Any number. Integers and floats share one representation so that `3` and
    /// `3.0` compare and print identically.
    Number(f64),
    /// Free text.
    Text(String),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Nested object, ordered by key.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Converts the value to the text used for searching, filtering and display.
    ///
    /// # Conversion Rules
    ///
    /// - `Null` → empty string
    /// - `Bool` → `true` / `false`
    /// - `Number` → integral values without a fraction (`3`), others shortest decimal
    /// - `List` → element texts joined by `,`
    /// - `Map` → value texts joined by a space
    ///
    /// # Example
    ///
    /// ```
    /// use planboard::Value;
    ///
    /// assert_eq!(Value::Number(42.0).to_text(), "42");
    /// assert_eq!(Value::Number(0.5).to_text(), "0.5");
    /// assert_eq!(Value::Null.to_text(), "");
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(Self::to_text)
                .collect::<Vec<_>>()
                .join(","),
            Self::Map(map) => map
                .values()
                .map(Self::to_text)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Returns the numeric content, if this is a number.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text content, if this is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Rank used to order values of different kinds.
    const fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
            Self::List(_) => 4,
            Self::Map(_) => 5,
        }
    }

    /// Compares two values with a total order.
    ///
    /// Numbers compare numerically, text lexicographically and booleans with
    /// `false < true`. NaN sorts after every other number and equals itself.
    /// Values of different kinds order by kind:
    /// `Null < Bool < Number < Text < List < Map`.
    ///
    /// # Example
    ///
    /// ```
    /// use planboard::Value;
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Value::Number(2.0).compare(&Value::Number(10.0)), Ordering::Less);
    /// assert_eq!(Value::from("b").compare(&Value::from("a")), Ordering::Greater);
    /// ```
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => compare_numbers(*a, *b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ord = x.compare(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            (Self::Map(_), Self::Map(_)) => self.to_text().cmp(&other.to_text()),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    format!("{n}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_of_nested_values() {
        let value = Value::from(json!({"nome": "Ana Costa", "iniciais": "AC"}));
        assert_eq!(value.to_text(), "AC Ana Costa");

        let list = Value::from(json!([1, "dois", true]));
        assert_eq!(list.to_text(), "1,dois,true");
    }

    #[test]
    fn numbers_print_like_integers_when_integral() {
        assert_eq!(Value::from(json!(85)).to_text(), "85");
        assert_eq!(Value::from(json!(85.0)).to_text(), "85");
        assert_eq!(Value::from(json!(-3.25)).to_text(), "-3.25");
    }

    #[test]
    fn nan_sorts_after_numbers() {
        let nan = Value::Number(f64::NAN);
        assert_eq!(nan.compare(&Value::Number(1e300)), Ordering::Greater);
        assert_eq!(nan.compare(&nan), Ordering::Equal);
    }

    #[test]
    fn mixed_kinds_order_by_rank() {
        assert_eq!(Value::Null.compare(&Value::Number(0.0)), Ordering::Less);
        assert_eq!(Value::from("0").compare(&Value::Number(5.0)), Ordering::Greater);
    }

    #[test]
    fn serializes_integral_numbers_without_fraction() {
        let out = serde_json::to_string(&Value::from(json!({"a": 1, "b": 1.5}))).unwrap();
        assert_eq!(out, r#"{"a":1,"b":1.5}"#);
    }
}
