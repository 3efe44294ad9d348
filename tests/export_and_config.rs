//! File-backed tests: configuration and schema loading, and export output.

use planboard::export::{export_data, write_export};
use planboard::{
    handle_event, initialize, CellFormat, Config, ExportFormat, ExportOptions, PlanboardError,
    TableAction, TableEvent, TableSchema,
};
use serde_json::{json, Value as Json};
use std::time::Instant;

const SCHEMA: &str = r#"
title = "Tarefas"

[[columns]]
key = "titulo"
header = "Título"
sortable = true

[[columns]]
key = "orcamento"
header = "Orçamento"
sortable = true
render = "currency"

[[columns]]
key = "responsavel"
header = "Responsável"
rules = { required = true, min_length = 3 }

[[filters]]
key = "status"
label = "Status"
options = [
    { value = "pendente", label = "Pendente" },
    { value = "concluida", label = "Concluída" },
]
"#;

fn rows() -> Vec<Json> {
    vec![
        json!({"titulo": "Revisar PAA", "orcamento": 1500.5, "responsavel": "Ana", "status": "pendente"}),
        json!({"titulo": "Publicar edital", "orcamento": 320, "responsavel": "", "status": "concluida"}),
        json!({"titulo": "Atualizar metas", "orcamento": 12000, "responsavel": "Lu", "status": "pendente"}),
    ]
}

#[test]
fn config_and_schema_load_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("planboard.toml");
    let schema_path = dir.path().join("tarefas.toml");
    std::fs::write(&config_path, "page_size = 2\ndebounce_ms = 0\n").unwrap();
    std::fs::write(&schema_path, SCHEMA).unwrap();

    let config = Config::from_file(&config_path).unwrap();
    let schema = TableSchema::from_file(&schema_path).unwrap();
    assert_eq!(config.page_size, 2);
    assert_eq!(schema.title.as_deref(), Some("Tarefas"));
    assert_eq!(schema.column("orcamento").unwrap().render, Some(CellFormat::Currency));

    let table = initialize(&config, schema, rows());
    let view = table.view();
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.rows[0].cells[1], "R$ 1.500,50");
    assert_eq!(
        view.footer.map(|f| f.page_label).as_deref(),
        Some("Página 1 de 2")
    );

    let issues = table.validate_rows();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].row, 1);
    assert_eq!(issues[0].errors["responsavel"], vec!["Campo obrigatório"]);
    assert_eq!(issues[1].errors["responsavel"], vec!["Deve ter pelo menos 3 caracteres"]);
}

#[test]
fn invalid_config_files_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");

    std::fs::write(&path, "page_size = 0").unwrap();
    assert!(matches!(Config::from_file(&path), Err(PlanboardError::Config(_))));

    std::fs::write(&path, "page_size = \"dez\"").unwrap();
    assert!(matches!(Config::from_file(&path), Err(PlanboardError::Toml(_))));

    let missing = dir.path().join("missing.toml");
    assert!(matches!(Config::from_file(missing), Err(PlanboardError::Io(_))));
}

#[test]
fn export_action_writes_processed_rows_in_display_order() {
    let dir = tempfile::tempdir().unwrap();
    let schema = TableSchema::from_toml(SCHEMA).unwrap();
    let mut table = initialize(&Config::default(), schema, rows());
    let now = Instant::now();

    handle_event(
        &mut table,
        TableEvent::SetFilter {
            key: "status".into(),
            value: "pendente".into(),
        },
        now,
    );
    handle_event(&mut table, TableEvent::Sort("orcamento".into()), now);
    handle_event(&mut table, TableEvent::Sort("orcamento".into()), now);

    let (_, actions) = handle_event(&mut table, TableEvent::Export(ExportFormat::Csv), now);
    let [TableAction::Export { format, rows }] = actions.as_slice() else {
        panic!("expected a single export action, got {actions:?}");
    };
    let selected: Vec<&Json> = rows.iter().filter_map(|&i| table.row(i)).collect();

    let options = ExportOptions {
        filename: "tarefas".into(),
        format: *format,
        title: Some("Pendentes".into()),
    };
    let path = write_export(dir.path(), &selected, &options).unwrap();
    assert_eq!(path, dir.path().join("tarefas.csv"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Pendentes\n\n\
         titulo;orcamento;responsavel;status\n\
         Atualizar metas;12000;Lu;pendente\n\
         Revisar PAA;1500.5;Ana;pendente\n"
    );
}

#[test]
fn json_export_report() {
    let dir = tempfile::tempdir().unwrap();
    let options = ExportOptions {
        format: ExportFormat::Json,
        ..ExportOptions::default()
    };

    let report = export_data(dir.path(), &rows(), &options);
    assert!(report.success, "{}", report.message);
    assert_eq!(report.message, "Dados exportados com sucesso em formato JSON");

    let text = std::fs::read_to_string(dir.path().join("export.json")).unwrap();
    let document: Json = serde_json::from_str(&text).unwrap();
    assert_eq!(document["title"], "Dados Exportados");
    assert_eq!(document["totalRecords"], 3);
    assert_eq!(document["data"][1]["titulo"], "Publicar edital");
    let keys: Vec<&str> = document["data"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["titulo", "orcamento", "responsavel", "status"]);
    assert!(document["exportedAt"].as_str().unwrap().ends_with('Z'));
}
