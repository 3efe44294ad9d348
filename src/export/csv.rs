//! Semicolon-separated export.
//!
//! ```text
//! Relatório de Indicadores      ← optional title
//!                               ← blank line after the title
//! nome;valorAtual;meta          ← field names of the first row
//! Eficiência;85;90
//! ```

use crate::domain::error::{PlanboardError, Result};
use crate::domain::{Record, Value};

const SEPARATOR: char = ';';

/// Renders rows as CSV with headers taken from the first row.
///
/// # Errors
///
/// Returns [`PlanboardError::NoData`] when `rows` is empty.
pub fn render<R: Record>(rows: &[R], title: Option<&str>) -> Result<String> {
    let first = rows.first().ok_or(PlanboardError::NoData)?;
    let headers = first.field_names();

    let mut out = String::new();
    if let Some(title) = title.filter(|t| !t.is_empty()) {
        out.push_str(title);
        out.push_str("\n\n");
    }

    push_line(&mut out, headers.iter().map(String::as_str));

    for row in rows {
        let cells: Vec<String> = headers.iter().map(|h| cell(&row.value(h))).collect();
        push_line(&mut out, cells.iter().map(String::as_str));
    }

    Ok(out)
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(cell);
    }
    out.push('\n');
}

fn cell(value: &Value) -> String {
    match value {
        Value::Text(text) if text.contains(SEPARATOR) => {
            format!("\"{}\"", text.replace('"', "\"\""))
        }
        other => other.to_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_title_headers_and_rows() {
        let rows = vec![
            json!({"meta": 90, "nome": "Eficiência", "obs": null}),
            json!({"meta": 80.5, "nome": "Custos; despesas", "obs": "diz \"ok\""}),
        ];
        let csv = render(&rows, Some("Indicadores")).unwrap();
        assert_eq!(
            csv,
            "Indicadores\n\nmeta;nome;obs\n90;Eficiência;\n80.5;\"Custos; despesas\";diz \"ok\"\n"
        );
    }

    #[test]
    fn quotes_are_doubled_inside_quoted_cells() {
        let rows = vec![json!({"a": "x;\"y\""})];
        assert_eq!(render(&rows, None).unwrap(), "a\n\"x;\"\"y\"\"\"\n");
    }

    #[test]
    fn headers_come_from_first_row_only() {
        let rows = vec![json!({"a": 1}), json!({"a": 2, "b": 3})];
        assert_eq!(render(&rows, None).unwrap(), "a\n1\n2\n");
    }

    #[test]
    fn headers_keep_source_field_order() {
        let rows = vec![json!({"titulo": "A", "orcamento": 1, "status": "x"})];
        assert_eq!(render(&rows, None).unwrap(), "titulo;orcamento;status\nA;1;x\n");
    }

    #[test]
    fn empty_rows_fail() {
        let rows: Vec<serde_json::Value> = Vec::new();
        assert!(matches!(render(&rows, None), Err(PlanboardError::NoData)));
    }
}
