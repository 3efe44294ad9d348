//! Plain-text table renderer.
//!
//! Lays a [`TableView`] out as an aligned text table for terminals and logs.
//! Column widths are the widest of the header and the visible cells, counted in
//! characters.
//!
//! # Layout
//!
//! ```text
//! Indicadores
//! Buscar: eficiência   Status: atrasado
//!
//! ID  Indicador ↑              Atual
//! --  -----------------------  -----
//! 3   Eficiência Operacional   85
//!
//! Mostrando 1 a 1 de 1 resultados   Página 1 de 1
//! ```

use crate::ui::viewmodel::TableView;
use std::fmt::Write as _;

const BOLD: &str = "\u{1b}[1m";
const DIM: &str = "\u{1b}[2m";
const RESET: &str = "\u{1b}[0m";
const COLUMN_GAP: &str = "  ";

/// Renders the view to stdout with ANSI styling.
pub fn render(view: &TableView) {
    print!("{}", render_to_string(view, true));
}

/// Renders the view as text, optionally with ANSI bold headers.
#[must_use]
pub fn render_to_string(view: &TableView, ansi: bool) -> String {
    let (bold, dim, reset) = if ansi { (BOLD, DIM, RESET) } else { ("", "", "") };
    let mut out = String::new();

    if let Some(title) = &view.title {
        let _ = writeln!(out, "{bold}{title}{reset}");
    }

    let mut controls = Vec::new();
    if !view.search_bar.query.is_empty() {
        controls.push(format!("Buscar: {}", view.search_bar.query));
    }
    for filter in &view.filters {
        if let Some(selected) = &filter.selected {
            controls.push(format!("{}: {selected}", filter.label));
        }
    }
    if !controls.is_empty() {
        let _ = writeln!(out, "{dim}{}{reset}", controls.join("   "));
    }
    if view.title.is_some() || !controls.is_empty() {
        out.push('\n');
    }

    let headers: Vec<String> = view
        .header
        .iter()
        .map(|cell| match cell.sort_indicator {
            Some(arrow) => format!("{} {arrow}", cell.header),
            None => cell.header.clone(),
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            view.rows
                .iter()
                .filter_map(|row| row.cells.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let _ = writeln!(out, "{bold}{}{reset}", join_padded(&headers, &widths));
    let rules: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    let _ = writeln!(out, "{}", join_padded(&rules, &widths));

    if let Some(empty) = &view.empty_state {
        let _ = writeln!(out, "{dim}{}{reset}", empty.message);
    }
    for row in &view.rows {
        let _ = writeln!(out, "{}", join_padded(&row.cells, &widths));
    }

    if let Some(footer) = &view.footer {
        let _ = writeln!(out, "\n{}   {}", footer.summary, footer.page_label);
    }

    out
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnDef, DataTable, TableSchema, TableSettings};
    use serde_json::json;
    use std::time::Duration;

    fn table(rows: usize) -> DataTable<serde_json::Value> {
        let data = (1..=rows)
            .map(|i| json!({"id": i, "nome": format!("Meta {i}")}))
            .collect();
        let schema = TableSchema::new(vec![
            ColumnDef::new("id", "ID").sortable(),
            ColumnDef::new("nome", "Nome"),
        ])
        .with_title("Metas");
        let settings = TableSettings {
            page_size: 2,
            debounce: Duration::ZERO,
            ..TableSettings::default()
        };
        DataTable::new(data, schema, settings)
    }

    #[test]
    fn renders_aligned_columns_and_footer() {
        let mut table = table(3);
        table.sort_by("id");
        let text = render_to_string(&table.view(), false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Metas");
        assert_eq!(lines[2], "ID ↑  Nome");
        assert_eq!(lines[3], "----  ------");
        assert_eq!(lines[4], "1     Meta 1");
        assert!(text.contains("Mostrando 1 a 2 de 3 resultados   Página 1 de 2"));
    }

    #[test]
    fn renders_empty_state() {
        let mut table = table(3);
        table.apply_search("inexistente");
        let text = render_to_string(&table.view(), false);
        assert!(text.contains("Buscar: inexistente"));
        assert!(text.contains("Nenhum resultado encontrado"));
        assert!(!text.contains("Mostrando"));
    }
}
