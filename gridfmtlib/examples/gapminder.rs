//! Print the gapminder sample with and without column formatting.

use gridfmtlib::{
    Alignment, ColumnDescriptor, ColumnSize, Dataset, GridBuilder, GridConfiguration, GridTable,
    ValueFormatter,
};
use std::env;

fn print_table(grid: &GridConfiguration, title: &str) {
    let table = GridTable::from_grid(grid).expect("Failed to format grid");
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();
    println!("{}", table.padded_headers().join(" ").trim_end());
    println!("{}", table.separator());
    for row in table.padded_rows() {
        println!("{}", row.join(" ").trim_end());
    }
    println!();
}

fn main() {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "gridfmt/tests/fixtures/gapminder.json".to_string());
    let dataset = Dataset::load(&path).expect("Failed to load dataset");

    let formatted = GridBuilder::new(&dataset)
        .column(ColumnDescriptor::new("country").header("Country"))
        .column(ColumnDescriptor::new("continent").header("Continent"))
        .column(ColumnDescriptor::new("year").header("Year"))
        .column(
            ColumnDescriptor::new("lifeExp")
                .header("Life Expectancy")
                .formatter(ValueFormatter::fixed_decimal(1))
                .align(Alignment::End),
        )
        .column(
            ColumnDescriptor::new("pop")
                .header("Population")
                .formatter(ValueFormatter::grouped_integer())
                .align(Alignment::End),
        )
        .column(
            ColumnDescriptor::new("gdpPercap")
                .header("GDP per Capita")
                .formatter(ValueFormatter::currency("$", 1))
                .align(Alignment::End),
        )
        .column_size(ColumnSize::SizeToFit)
        .build()
        .expect("Invalid column configuration");

    let raw = GridConfiguration::unformatted(&dataset);

    print_table(&formatted, "Gapminder Data with formatting");
    print_table(&raw, "Gapminder Data without formatting");
}
