//! # gridfmt
//!
//! A CLI for rendering datasets as formatted grids from declarative column
//! definitions.
//!
//! ## Overview
//!
//! gridfmt is built on top of gridfmtlib and acts as a minimal rendering host:
//! it loads a dataset, validates a column-definition file against it and
//! prints the resulting grid as a text table, CSV, or the host-facing JSON
//! configuration.
//!
//! ## Features
//!
//! - **Typed formatters**: `fixed-decimal`, `grouped-integer`, `currency`,
//!   `percent` and spec strings such as `"$,.1f"`
//! - **Early validation**: unknown fields and conflicting columns fail before
//!   anything is printed
//! - **Multiple output formats**: table (default), CSV, JSON
//! - **Comparison view**: formatted and raw grids side by side
//!
//! ## Usage
//!
//! ```bash
//! # Raw grid: one column per field
//! gridfmt render gapminder.csv
//!
//! # Formatted grid from a column-definition file
//! gridfmt render gapminder.json --columns columns.json
//!
//! # Formatted and raw grids, one after the other
//! gridfmt render gapminder.json --columns columns.json --compare
//!
//! # Host-facing configuration
//! gridfmt render gapminder.json --columns columns.json --output json
//!
//! # List the fields of a dataset
//! gridfmt schema gapminder.json
//!
//! # Format a single value
//! gridfmt format 1282697 --spec ,.0f
//! ```

mod logging;
mod render;

use std::path::Path;
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use gridfmtlib::{CellValue, ColumnSize, Dataset, GridConfiguration, GridSpec, ValueFormatter};
use serde_json::json;
use tracing::debug;

use logging::{init_logging, LogConfig};
use render::{render_csv, render_json, render_table, OutputMode};

/// Selected output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Auto,
    Term,
    Text,
    Json,
    Csv,
}

impl Output {
    fn from_matches(matches: &ArgMatches) -> Self {
        match matches.get_one::<String>("output").map(String::as_str) {
            Some("term") => Output::Term,
            Some("text") => Output::Text,
            Some("json") => Output::Json,
            Some("csv") => Output::Csv,
            _ => Output::Auto,
        }
    }

    /// Template output mode for the table formats
    fn mode(self) -> OutputMode {
        match self {
            Output::Term => OutputMode::Term,
            Output::Text => OutputMode::Text,
            _ => OutputMode::Auto,
        }
    }
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("gridfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Arthur Debert")
        .about("Render datasets as formatted grids from declarative column definitions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .default_value("auto")
                .value_parser(["auto", "term", "text", "json", "csv"])
                .help("Output format"),
        )
        .subcommand(
            Command::new("render")
                .about("Render a dataset as a grid")
                .arg(
                    Arg::new("dataset")
                        .required(true)
                        .help("Dataset file (.json array of records or .csv with headers)"),
                )
                .arg(
                    Arg::new("columns")
                        .short('c')
                        .long("columns")
                        .help("Column-definition file (JSON); one raw column per field when omitted"),
                )
                .arg(
                    Arg::new("column-size")
                        .long("column-size")
                        .value_parser(["sizeToFit", "autoSizeAll"])
                        .help("Grid-wide column sizing strategy"),
                )
                .arg(
                    Arg::new("fallback")
                        .long("fallback")
                        .help("Text shown for values a formatter cannot render (default: fail)"),
                )
                .arg(
                    Arg::new("title")
                        .short('t')
                        .long("title")
                        .help("Title printed above the table"),
                )
                .arg(
                    Arg::new("compare")
                        .long("compare")
                        .action(ArgAction::SetTrue)
                        .requires("columns")
                        .help("Also render the raw grid after the formatted one"),
                ),
        )
        .subcommand(
            Command::new("schema")
                .about("List the fields of a dataset")
                .arg(Arg::new("dataset").required(true).help("Dataset file")),
        )
        .subcommand(
            Command::new("format")
                .about("Format a single value")
                .arg(
                    Arg::new("value")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Raw value (numbers are detected automatically)"),
                )
                .arg(
                    Arg::new("spec")
                        .short('s')
                        .long("spec")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("Format spec, e.g. .1f  ,.0f  $,.1f  .0%"),
                ),
        )
}

/// Extract a required string argument
fn required<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("missing argument '{}'", name))
}

/// Title base for a dataset: explicit --title or the file stem
fn dataset_name(path: &str, title: Option<&String>) -> String {
    title.cloned().unwrap_or_else(|| {
        Path::new(path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string())
    })
}

/// Load the column spec and apply command-line overrides
fn load_spec(matches: &ArgMatches) -> anyhow::Result<Option<GridSpec>> {
    let Some(path) = matches.get_one::<String>("columns") else {
        return Ok(None);
    };
    let mut spec = GridSpec::load(path)?;
    if let Some(size) = matches.get_one::<String>("column-size") {
        spec.column_size = Some(size.parse().map_err(anyhow::Error::msg)?);
    }
    if let Some(text) = matches.get_one::<String>("fallback") {
        spec.fallback = Some(text.clone());
    }
    debug!(path = %path, columns = spec.columns.len(), "loaded column definitions");
    Ok(Some(spec))
}

/// Render one grid in the selected format
fn render_one(
    grid: &GridConfiguration,
    title: Option<&str>,
    output: Output,
) -> anyhow::Result<String> {
    match output {
        Output::Json => render_json(grid),
        Output::Csv => render_csv(grid),
        _ => render_table(grid, title, output.mode()),
    }
}

/// Handler for render command
fn render_handler(matches: &ArgMatches) -> anyhow::Result<String> {
    let path = required(matches, "dataset")?;
    let output = Output::from_matches(matches);
    let dataset = Dataset::load(path)?;
    let spec = load_spec(matches)?;

    let raw_column_size = matches
        .get_one::<String>("column-size")
        .map(|size| size.parse::<ColumnSize>())
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let raw = || {
        let size = raw_column_size.or(spec.as_ref().and_then(|s| s.column_size));
        GridConfiguration::unformatted(&dataset).with_column_size(size)
    };

    let Some(spec) = &spec else {
        let title = matches.get_one::<String>("title").map(String::as_str);
        return render_one(&raw(), title, output);
    };

    let grid = spec.build(&dataset)?;

    if !matches.get_flag("compare") {
        let title = matches.get_one::<String>("title").map(String::as_str);
        return render_one(&grid, title, output);
    }

    let raw_grid = raw();
    if output == Output::Json {
        return render_json(&json!({
            "formatted": grid,
            "unformatted": raw_grid,
        }));
    }

    let name = dataset_name(path, matches.get_one::<String>("title"));
    let formatted_title = format!("{} with formatting", name);
    let raw_title = format!("{} without formatting", name);
    let mut rendered = render_one(&grid, Some(&formatted_title), output)?;
    rendered.push('\n');
    rendered.push_str(&render_one(&raw_grid, Some(&raw_title), output)?);
    Ok(rendered)
}

/// Handler for schema command
fn schema_handler(matches: &ArgMatches) -> anyhow::Result<String> {
    let path = required(matches, "dataset")?;
    let dataset = Dataset::load(path)?;
    let fields = dataset.schema();

    match Output::from_matches(matches) {
        Output::Json => render_json(&json!({
            "records": dataset.len(),
            "fields": fields,
        })),
        Output::Csv => Ok(format!("field\n{}\n", fields.join("\n"))),
        _ => {
            let mut out = format!("{} records, {} fields\n", dataset.len(), fields.len());
            for field in &fields {
                out.push_str(&format!("  {}\n", field));
            }
            Ok(out)
        }
    }
}

/// Handler for format command
fn format_handler(matches: &ArgMatches) -> anyhow::Result<String> {
    let raw = required(matches, "value")?;
    let spec = required(matches, "spec")?;
    let formatter = ValueFormatter::spec(spec)?;
    let value = CellValue::infer(raw);
    let formatted = formatter.format(&value)?;

    match Output::from_matches(matches) {
        Output::Json => render_json(&json!({
            "value": value,
            "formatter": formatter,
            "formatted": formatted,
        })),
        _ => Ok(format!("{}\n", formatted)),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();

    let verbosity = matches.get_count("verbose");
    init_logging(
        &LogConfig::from_verbosity(verbosity).with_ansi(console::colors_enabled_stderr()),
    );

    let result = match matches.subcommand() {
        Some(("render", sub)) => render_handler(sub),
        Some(("schema", sub)) => schema_handler(sub),
        Some(("format", sub)) => format_handler(sub),
        _ => Err(anyhow::anyhow!("unknown command")),
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
