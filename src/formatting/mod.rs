//! pt-BR formatting and validation helpers.
//!
//! # Modules
//!
//! - [`formatters`]: Currency, number, date, document and text formatting
//! - [`validators`]: Field predicates and per-record rule checking
//!
//! [`CellFormat`] names a formatter so schemas can pick one from TOML
//! (`render = "currency"`, `render = "truncate:40"`).

pub mod formatters;
pub mod validators;

pub use formatters::{
    capitalize_first, capitalize_words, format_cnpj, format_cpf, format_currency, format_date,
    format_date_time, format_duration, format_file_size, format_initials, format_number,
    format_percentage, format_phone, format_time_ago, parse_date_time, truncate_text,
};
pub use validators::{
    validate_cnpj, validate_cpf, validate_date_range, validate_email, validate_future_date,
    validate_max_length, validate_max_value, validate_min_length, validate_min_value,
    validate_password, validate_past_date, validate_phone, validate_range, validate_record,
    validate_required, validate_url, FieldRules, FormValidation, PasswordCheck,
};

use crate::domain::Value;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A named cell formatter.
///
/// Numeric formats leave non-numeric values as plain text; text formats use the
/// value's text form. Null always renders empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CellFormat {
    Currency,
    Number,
    /// One decimal place.
    Percentage,
    Date,
    DateTime,
    /// Relative to the local clock at render time.
    TimeAgo,
    /// Value in bytes.
    FileSize,
    /// Value in minutes.
    Duration,
    Initials,
    Phone,
    Cpf,
    Cnpj,
    Uppercase,
    /// Every word capitalized.
    Capitalize,
    Truncate(usize),
}

impl CellFormat {
    /// Formats a raw value for display.
    #[must_use]
    pub fn apply(self, value: &Value) -> String {
        if value.is_null() {
            return String::new();
        }

        let number = value.as_f64();
        let text = value.to_text();

        match self {
            Self::Currency => number.map_or(text, format_currency),
            Self::Number => number.map_or(text, format_number),
            Self::Percentage => number.map_or(text, |n| format_percentage(n, 1)),
            Self::FileSize => number.map_or(text, format_file_size),
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Self::Duration => number
                .filter(|n| *n >= 0.0)
                .map_or(text, |n| format_duration(n.round() as u64)),
            Self::Date => format_date(&text),
            Self::DateTime => format_date_time(&text),
            Self::TimeAgo => format_time_ago(&text, chrono::Local::now().naive_local()),
            Self::Initials => format_initials(&text),
            Self::Phone => format_phone(&text),
            Self::Cpf => format_cpf(&text),
            Self::Cnpj => format_cnpj(&text),
            Self::Uppercase => text.to_uppercase(),
            Self::Capitalize => capitalize_words(&text),
            Self::Truncate(max) => truncate_text(&text, max),
        }
    }
}

impl FromStr for CellFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let format = match name.as_str() {
            "currency" => Self::Currency,
            "number" => Self::Number,
            "percentage" => Self::Percentage,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "time_ago" => Self::TimeAgo,
            "file_size" => Self::FileSize,
            "duration" => Self::Duration,
            "initials" => Self::Initials,
            "phone" => Self::Phone,
            "cpf" => Self::Cpf,
            "cnpj" => Self::Cnpj,
            "uppercase" => Self::Uppercase,
            "capitalize" => Self::Capitalize,
            other => {
                return other
                    .strip_prefix("truncate:")
                    .and_then(|n| n.trim().parse().ok())
                    .map(Self::Truncate)
                    .ok_or_else(|| format!("unknown cell format `{s}`"));
            }
        };
        Ok(format)
    }
}

impl TryFrom<String> for CellFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for CellFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Currency => "currency",
            Self::Number => "number",
            Self::Percentage => "percentage",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::TimeAgo => "time_ago",
            Self::FileSize => "file_size",
            Self::Duration => "duration",
            Self::Initials => "initials",
            Self::Phone => "phone",
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::Uppercase => "uppercase",
            Self::Capitalize => "capitalize",
            Self::Truncate(max) => return write!(f, "truncate:{max}"),
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("currency".parse(), Ok(CellFormat::Currency));
        assert_eq!("DateTime".parse(), Ok(CellFormat::DateTime));
        assert_eq!("truncate:12".parse(), Ok(CellFormat::Truncate(12)));
        assert!("truncate:x".parse::<CellFormat>().is_err());
        assert!("sparkline".parse::<CellFormat>().is_err());
        assert_eq!(CellFormat::Truncate(3).to_string(), "truncate:3");
    }

    #[test]
    fn applies_by_value_kind() {
        assert_eq!(CellFormat::Currency.apply(&Value::Number(1234.56)), "R$ 1.234,56");
        assert_eq!(CellFormat::Currency.apply(&Value::from("n/d")), "n/d");
        assert_eq!(CellFormat::Currency.apply(&Value::Null), "");
        assert_eq!(CellFormat::Percentage.apply(&Value::Number(72.26)), "72.3%");
        assert_eq!(CellFormat::Duration.apply(&Value::Number(90.0)), "1h 30min");
        assert_eq!(CellFormat::Date.apply(&Value::from("2024-12-31")), "31/12/2024");
        assert_eq!(CellFormat::Cpf.apply(&Value::from("52998224725")), "529.982.247-25");
        assert_eq!(CellFormat::Capitalize.apply(&Value::from("em andamento")), "Em Andamento");
        assert_eq!(CellFormat::Truncate(4).apply(&Value::from("Objetivo")), "Obje...");
    }
}
