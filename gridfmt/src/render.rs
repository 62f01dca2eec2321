//! Template rendering for CLI output using outstanding

use console::Style;
use gridfmtlib::{GridConfiguration, GridTable};
use outstanding::{render_with_output, Theme};
use serde::Serialize;

/// Include template at compile time
const GRID_TABLE_TEMPLATE: &str = include_str!("../templates/grid_table.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Data context for the grid table template
#[derive(Debug, Serialize)]
struct GridTableContext {
    /// Optional title line
    title: Option<String>,
    /// Pre-padded header line
    header: String,
    /// Separator line (dashes)
    separator: String,
    /// Pre-padded data lines
    rows: Vec<String>,
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new()
        .add("title", Style::new().bold())
        .add("header", Style::new().bold())
}

fn build_context(table: &GridTable) -> GridTableContext {
    GridTableContext {
        title: table.title.clone(),
        header: join_cells(&table.padded_headers()),
        separator: table.separator(),
        rows: table
            .padded_rows()
            .iter()
            .map(|cells| join_cells(cells))
            .collect(),
    }
}

/// Join padded cells with a single space and drop trailing padding.
fn join_cells(cells: &[String]) -> String {
    cells.join(" ").trim_end().to_string()
}

/// Render a grid as a text table
pub fn render_table(
    grid: &GridConfiguration,
    title: Option<&str>,
    output_mode: OutputMode,
) -> anyhow::Result<String> {
    let mut table = GridTable::from_grid(grid)?;
    if let Some(title) = title {
        table = table.with_title(title);
    }

    let context = build_context(&table);
    let theme = create_theme();
    render_with_output(GRID_TABLE_TEMPLATE, &context, &theme, output_mode)
        .map_err(|e| anyhow::anyhow!("failed to render table: {e}"))
}

/// Render a grid as CSV of display strings
pub fn render_csv(grid: &GridConfiguration) -> anyhow::Result<String> {
    Ok(GridTable::from_grid(grid)?.to_csv()?)
}

/// Render the host-facing configuration as pretty JSON
pub fn render_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfmtlib::{Dataset, Record};

    fn sample_table() -> GridTable {
        let data = Dataset::new(vec![
            Record::new().with("country", "Afghanistan").with("year", 1952.0),
            Record::new().with("country", "Albania").with("year", 1957.0),
        ]);
        GridTable::from_grid(&GridConfiguration::unformatted(&data)).unwrap()
    }

    #[test]
    fn test_build_context() {
        let context = build_context(&sample_table());
        assert_eq!(context.header, "Country     Year");
        assert_eq!(context.separator, "----------------");
        assert_eq!(context.rows, vec!["Afghanistan 1952", "Albania     1957"]);
        assert!(context.title.is_none());
    }

    #[test]
    fn test_join_cells_trims_trailing_padding() {
        let cells = vec!["a   ".to_string(), "b   ".to_string()];
        assert_eq!(join_cells(&cells), "a    b");
    }
}
