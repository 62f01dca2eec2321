//! Integration tests for gridfmt CLI

use std::process::Command;

const DATASET: &str = "gridfmt/tests/fixtures/gapminder.json";
const DATASET_CSV: &str = "gridfmt/tests/fixtures/gapminder.csv";
const COLUMNS: &str = "gridfmt/tests/fixtures/columns.json";

fn run_gridfmt(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-p", "gridfmt", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_gridfmt(&["--help"]);

    assert!(success);
    assert!(stdout.contains("gridfmt"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("schema"));
    assert!(stdout.contains("format"));
    assert!(stdout.contains("--output"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_gridfmt(&["--version"]);

    assert!(success);
    assert!(stdout.contains("gridfmt"));
}

#[test]
fn test_render_formatted_table() {
    let (stdout, stderr, success) =
        run_gridfmt(&["render", DATASET, "--columns", COLUMNS, "--output", "text"]);

    assert!(success, "stderr: {}", stderr);
    assert!(stdout.contains("Life Expectancy"));
    assert!(stdout.contains("GDP per Capita"));
    assert!(stdout.contains("28.8"));
    assert!(stdout.contains("8,425,333"));
    assert!(stdout.contains("1,282,697"));
    assert!(stdout.contains("$779.4"));
    assert!(stdout.contains("$1,601.1"));
    // Raw values never leak into the formatted grid
    assert!(!stdout.contains("779.4453145"));
}

#[test]
fn test_render_without_columns_shows_raw_values() {
    let (stdout, stderr, success) = run_gridfmt(&["render", DATASET, "--output", "text"]);

    assert!(success, "stderr: {}", stderr);
    // Headers are humanized field names
    assert!(stdout.contains("Life Exp"));
    assert!(stdout.contains("Gdp Percap"));
    assert!(stdout.contains("779.4453145"));
    assert!(stdout.contains("8425333"));
    assert!(!stdout.contains("8,425,333"));
}

#[test]
fn test_render_csv_dataset() {
    let (stdout, stderr, success) =
        run_gridfmt(&["render", DATASET_CSV, "--columns", COLUMNS, "--output", "text"]);

    assert!(success, "stderr: {}", stderr);
    assert!(stdout.contains("9,240,934"));
    assert!(stdout.contains("$820.9"));
    assert!(stdout.contains("30.3"));
}

#[test]
fn test_json_output() {
    let (stdout, stderr, success) =
        run_gridfmt(&["render", DATASET, "--columns", COLUMNS, "--output", "json"]);

    assert!(success, "stderr: {}", stderr);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");

    let columns = parsed["columns"].as_array().expect("columns array");
    assert_eq!(columns.len(), 6);
    assert_eq!(columns[0]["field"], "country");
    assert_eq!(columns[3]["header"], "Life Expectancy");
    assert_eq!(columns[3]["formatter"]["kind"], "spec");
    assert_eq!(columns[3]["formatter"]["args"][0], ".1f");
    assert_eq!(columns[5]["align"], "end");
    assert_eq!(parsed["columnSize"], "sizeToFit");

    let rows = parsed["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0]["pop"], 8425333);
    assert_eq!(rows[0]["gdpPercap"], 779.4453145);
}

#[test]
fn test_csv_output() {
    let (stdout, stderr, success) =
        run_gridfmt(&["render", DATASET, "--columns", COLUMNS, "--output", "csv"]);

    assert!(success, "stderr: {}", stderr);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("Country,Continent,Year,Life Expectancy,Population,GDP per Capita")
    );
    assert_eq!(
        lines.next(),
        Some("Afghanistan,Asia,1952,28.8,\"8,425,333\",$779.4")
    );
}

#[test]
fn test_compare_output() {
    let (stdout, stderr, success) = run_gridfmt(&[
        "render", DATASET, "--columns", COLUMNS, "--compare", "--title", "Gapminder Data",
        "--output", "text",
    ]);

    assert!(success, "stderr: {}", stderr);
    let formatted = stdout
        .find("Gapminder Data with formatting")
        .expect("formatted title");
    let raw = stdout
        .find("Gapminder Data without formatting")
        .expect("raw title");
    assert!(formatted < raw);
    assert!(stdout[formatted..raw].contains("8,425,333"));
    assert!(stdout[raw..].contains("8425333"));
}

#[test]
fn test_compare_json_output() {
    let (stdout, stderr, success) = run_gridfmt(&[
        "render", DATASET, "--columns", COLUMNS, "--compare", "--output", "json",
    ]);

    assert!(success, "stderr: {}", stderr);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert!(parsed["formatted"]["columns"][4]["formatter"].is_object());
    assert!(parsed["unformatted"]["columns"][4].get("formatter").is_none());
}

#[test]
fn test_unknown_field_fails() {
    let (stdout, stderr, success) = run_gridfmt(&[
        "render",
        DATASET,
        "--columns",
        "gridfmt/tests/fixtures/unknown_field.json",
    ]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("unknown field 'nonexistent'"));
}

#[test]
fn test_unformattable_value_fails_without_fallback() {
    let (_, stderr, success) = run_gridfmt(&[
        "render",
        DATASET,
        "--columns",
        "gridfmt/tests/fixtures/text_as_number.json",
    ]);

    assert!(!success);
    assert!(stderr.contains("column 'country', row 0"));
}

#[test]
fn test_fallback_replaces_unformattable_values() {
    let (stdout, stderr, success) = run_gridfmt(&[
        "render",
        DATASET,
        "--columns",
        "gridfmt/tests/fixtures/text_as_number.json",
        "--fallback",
        "n/a",
        "--output",
        "csv",
    ]);

    assert!(success, "stderr: {}", stderr);
    assert_eq!(stdout.lines().nth(1), Some("n/a"));
    assert!(!stdout.contains("Afghanistan"));
}

#[test]
fn test_missing_dataset_fails() {
    let (_, stderr, success) = run_gridfmt(&["render", "gridfmt/tests/fixtures/missing.json"]);

    assert!(!success);
    assert!(stderr.contains("path does not exist"));
}

#[test]
fn test_schema() {
    let (stdout, stderr, success) = run_gridfmt(&["schema", DATASET, "--output", "text"]);

    assert!(success, "stderr: {}", stderr);
    assert!(stdout.starts_with("6 records, 8 fields"));
    let fields: Vec<&str> = stdout.lines().skip(1).map(str::trim).collect();
    assert_eq!(
        fields,
        vec![
            "country",
            "continent",
            "year",
            "lifeExp",
            "pop",
            "gdpPercap",
            "iso_alpha",
            "iso_num"
        ]
    );
}

#[test]
fn test_schema_json() {
    let (stdout, _, success) = run_gridfmt(&["schema", DATASET_CSV, "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["records"], 6);
    assert_eq!(parsed["fields"][3], "lifeExp");
}

#[test]
fn test_format_value() {
    let cases = [
        ("70.2", ".1f", "70.2"),
        ("1282697", ",.0f", "1,282,697"),
        ("779.4453", "$,.1f", "$779.4"),
        ("0.256", ".1%", "25.6%"),
        ("-1234.5", ",.2f", "-1,234.50"),
    ];
    for (value, spec, expected) in cases {
        let (stdout, stderr, success) = run_gridfmt(&["format", value, "--spec", spec]);
        assert!(success, "{} with {}: {}", value, spec, stderr);
        assert_eq!(stdout.trim_end(), expected);
    }
}

#[test]
fn test_format_rejects_text_and_bad_specs() {
    let (_, stderr, success) = run_gridfmt(&["format", "Asia", "--spec", ".1f"]);
    assert!(!success);
    assert!(stderr.contains("cannot format"));

    let (_, stderr, success) = run_gridfmt(&["format", "1", "--spec", ".1q"]);
    assert!(!success);
    assert!(stderr.contains("invalid format spec"));
}
