//! Lists the available views.

use crate::filters::Filter;
use anyhow::Result;
use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::Table;

/// Table of slug, title, predicate and required columns for every filter.
pub fn filter_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_header(vec!["Slug", "Title", "Selects", "Columns"]);
    for filter in Filter::ALL {
        table.add_row(vec![
            filter.slug().to_string(),
            filter.title().to_string(),
            filter.description().to_string(),
            filter.required_columns().join(", "),
        ]);
    }
    table
}

/// Print every available view to stdout.
pub fn run() -> Result<()> {
    println!("{}", filter_table());
    Ok(())
}
