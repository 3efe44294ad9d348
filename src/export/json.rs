//! JSON export document.

use crate::domain::error::Result;
use crate::domain::Record;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

pub const DEFAULT_TITLE: &str = "Dados Exportados";

#[derive(Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = "R: Record"))]
struct Document<'a, R: Record> {
    title: &'a str,
    exported_at: String,
    total_records: usize,
    data: Rows<'a, R>,
}

struct Rows<'a, R>(&'a [R]);

struct Row<'a, R>(&'a R);

impl<R: Record> Serialize for Rows<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for row in self.0 {
            seq.serialize_element(&Row(row))?;
        }
        seq.end()
    }
}

// Emits fields in the record's own order.
impl<R: Record> Serialize for Row<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.0.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Renders the pretty-printed export document.
///
/// ```json
/// {
///   "title": "Dados Exportados",
///   "exportedAt": "2024-06-10T12:00:00.000Z",
///   "totalRecords": 1,
///   "data": [{ "nome": "Eficiência", "valor": 85 }]
/// }
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render<R: Record>(
    rows: &[R],
    title: Option<&str>,
    exported_at: DateTime<Utc>,
) -> Result<String> {
    let document = Document {
        title: title.filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TITLE),
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        total_records: rows.len(),
        data: Rows(rows),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
