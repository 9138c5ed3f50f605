//! Where views are rendered.

use crate::firewall::types::{Header, Row};
use crate::utils::format::count_of;
use anyhow::{Context, Result};
use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{ContentArrangement, Table};
use std::io::Write;

/// Output sink for titled tables and operator notices.
pub trait TableSink {
    /// Render one titled table. `warnings` is the number of rows left out
    /// because they could not be classified.
    fn render(
        &mut self,
        title: &str,
        header: &Header,
        rows: &[&Row],
        warnings: usize,
    ) -> Result<()>;

    /// A one-line message (errors, "no data", exit notices).
    fn notice(&mut self, message: &str) -> Result<()>;
}

/// Renders tables as text on any writer.
pub struct ConsoleSink<W> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Build the text table for a view. Rows longer than the header get blank
/// header cells; shorter rows are padded.
pub fn build_table(header: &Header, rows: &[&Row]) -> Table {
    let width = rows
        .iter()
        .map(|r| r.len())
        .max()
        .unwrap_or(0)
        .max(header.len());

    let mut table = Table::new();
    table
        .load_preset(ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Disabled);

    let mut head: Vec<String> = header.columns().to_vec();
    head.resize(width, String::new());
    table.set_header(head);

    for row in rows {
        let mut cells = row.cells.clone();
        cells.resize(width, String::new());
        table.add_row(cells);
    }
    table
}

impl<W: Write> TableSink for ConsoleSink<W> {
    fn render(
        &mut self,
        title: &str,
        header: &Header,
        rows: &[&Row],
        warnings: usize,
    ) -> Result<()> {
        let table = build_table(header, rows);
        writeln!(self.out, "\n{}", title).context("Failed to write table")?;
        writeln!(self.out, "{}", table).context("Failed to write table")?;
        let footer = if warnings > 0 {
            format!(
                "({}, {} skipped)",
                count_of(rows.len(), "row"),
                count_of(warnings, "unclassifiable row")
            )
        } else {
            format!("({})", count_of(rows.len(), "row"))
        };
        writeln!(self.out, "{}", footer).context("Failed to write table")
    }

    fn notice(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message).context("Failed to write notice")
    }
}
