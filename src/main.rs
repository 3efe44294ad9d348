//! Planboard command line.
//!
//! Loads a table schema (TOML) and a JSON array of rows, drives the table engine
//! with the requested search, filters, sort and page, then prints the page,
//! writes an export, or reports validation failures.
//!
//! ```text
//! planboard schema.toml rows.json --search paa --filter status=ativo --sort prazo --page 2
//! planboard schema.toml rows.json --export csv --out ./relatorios
//! planboard schema.toml rows.json --check
//! ```

use clap::Parser;
use planboard::export::{export_data, ExportOptions, DEFAULT_FILENAME};
use planboard::observability::init_tracing;
use planboard::ui::{render, render_to_string};
use planboard::{
    handle_event, initialize, Config, DataTable, ExportFormat, TableAction, TableEvent,
    TableSchema,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// Browse, validate and export tabular planning data.
#[derive(Parser, Debug)]
#[command(name = "planboard")]
#[command(version)]
#[command(about = "Search, filter, sort, paginate and export tabular data")]
pub struct Args {
    /// Table schema (TOML)
    pub schema: PathBuf,

    /// Rows as a JSON array of objects
    pub rows: PathBuf,

    /// Engine configuration (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Free-text search applied across every field
    #[arg(short, long)]
    pub search: Option<String>,

    /// Equality filter, repeatable
    #[arg(short, long, value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filter: Vec<(String, String)>,

    /// Sort by column; repeat the same key to toggle descending
    #[arg(long, value_name = "KEY")]
    pub sort: Vec<String>,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Rows per page, overrides the configuration
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Export every processed row instead of printing a page
    #[arg(long, value_name = "csv|json")]
    pub export: Option<ExportFormat>,

    /// Directory for exported files
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// File stem for exported files
    #[arg(long, default_value = DEFAULT_FILENAME)]
    pub filename: String,

    /// Export title
    #[arg(long)]
    pub title: Option<String>,

    /// Report rows failing the schema's validation rules
    #[arg(long)]
    pub check: bool,

    /// Print the view model as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

fn load_config(args: &Args) -> planboard::Result<Config> {
    let mut config = args
        .config
        .as_ref()
        .map(Config::from_file)
        .transpose()?
        .unwrap_or_default();
    if let Some(size) = args.page_size {
        config.page_size = size as usize;
    }
    Ok(config)
}

fn load_rows(path: &Path) -> planboard::Result<Vec<serde_json::Value>> {
    let text = std::fs::read_to_string(path)?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&text)?;
    tracing::debug!(path = ?path, rows = rows.len(), "rows loaded");
    Ok(rows)
}

/// Replays the command-line query as table events.
fn apply_query(table: &mut DataTable<serde_json::Value>, args: &Args, config: &Config) {
    let now = Instant::now();

    if let Some(search) = &args.search {
        handle_event(table, TableEvent::SearchInput(search.clone()), now);
        let due = now + std::time::Duration::from_millis(config.debounce_ms);
        handle_event(table, TableEvent::Tick, due);
    }

    for (key, value) in &args.filter {
        handle_event(
            table,
            TableEvent::SetFilter {
                key: key.clone(),
                value: value.clone(),
            },
            now,
        );
    }

    for key in &args.sort {
        if !handle_event(table, TableEvent::Sort(key.clone()), now).0 {
            tracing::warn!(column = %key, "column is not sortable");
        }
    }

    handle_event(table, TableEvent::GoToPage(args.page as usize), now);
}

fn run(args: &Args) -> planboard::Result<ExitCode> {
    let config = load_config(args)?;
    config.validate()?;
    init_tracing(&config);

    let schema = TableSchema::from_file(&args.schema)?;
    let rows = load_rows(&args.rows)?;
    let mut table = initialize(&config, schema, rows);
    apply_query(&mut table, args, &config);

    if args.check {
        let issues = table.validate_rows();
        for issue in &issues {
            for (field, messages) in &issue.errors {
                println!("linha {}: {field}: {}", issue.row + 1, messages.join(", "));
            }
        }
        return Ok(if issues.is_empty() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if let Some(format) = args.export {
        let (_, actions) = handle_event(&mut table, TableEvent::Export(format), Instant::now());
        for action in actions {
            let TableAction::Export { format, rows } = action else {
                continue;
            };
            let selected: Vec<&serde_json::Value> =
                rows.iter().filter_map(|&i| table.row(i)).collect();
            let options = ExportOptions {
                filename: args.filename.clone(),
                format,
                title: args.title.clone(),
            };
            let report = export_data(&args.out, &selected, &options);
            if !report.success {
                eprintln!("planboard: {}", report.message);
                return Ok(ExitCode::FAILURE);
            }
            println!("{}", report.message);
            if let Some(path) = report.path {
                println!("{}", path.display());
            }
        }
        return Ok(ExitCode::SUCCESS);
    }

    let view = table.view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if args.no_color {
        print!("{}", render_to_string(&view, false));
    } else {
        render(&view);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    match run(&args) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %error, "planboard failed");
            eprintln!("planboard: {error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_does_not_error() {
        let err = Args::try_parse_from(["planboard", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["planboard", "s.toml", "r.json"]);
        assert_eq!(args.page, 1);
        assert!(args.filter.is_empty());
        assert_eq!(args.export, None);
        assert_eq!(args.filename, "export");
        assert_eq!(args.out, PathBuf::from("."));
    }

    #[test]
    fn repeated_filters_and_sorts() {
        let args = Args::parse_from([
            "planboard", "s.toml", "r.json", "-f", "status=ativo", "--filter", "area = TI",
            "--sort", "prazo", "--sort", "prazo", "--export", "json",
        ]);
        assert_eq!(
            args.filter,
            vec![
                ("status".to_string(), "ativo".to_string()),
                ("area".to_string(), "TI".to_string()),
            ]
        );
        assert_eq!(args.sort, vec!["prazo", "prazo"]);
        assert_eq!(args.export, Some(ExportFormat::Json));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::try_parse_from(["planboard", "s", "r", "--filter", "status"]).is_err());
        assert!(Args::try_parse_from(["planboard", "s", "r", "--export", "xlsx"]).is_err());
        assert!(Args::try_parse_from(["planboard", "s", "r", "--page", "0"]).is_err());
    }
}
