//! Batch analysis of one or more log exports.
//!
//! Renders the same tables as the interactive session, without prompting,
//! and can export every view to CSV or JSON.
//!
//! # Usage
//!
//! ```bash
//! # All views for a single export
//! fwlog analyze firewall.log
//!
//! # Several exports (plain or compressed), two views, CSV export
//! fwlog analyze day1.log day2.log.gz --filter blocked,public --export views.csv
//!
//! # JSON export without printing the main table
//! fwlog analyze firewall.log --no-main-table --export report.json
//! ```
//!
//! Unlike the interactive session, a malformed export fails the whole run
//! with an error naming the file.

use crate::commands::interactive::render_views;
use crate::console::{ConsoleSink, TableSink};
use crate::filters::FilterSet;
use crate::firewall::parse_log;
use crate::utils::export::{write_report, ExportFormat, FileReport, Report};
use crate::utils::format::count_of;
use crate::utils::reader::read_log_file;
use anyhow::{Context, Result};
use std::io;
use std::path::Path;

/// Analyze `log_files`, rendering to `sink`. Returns the per-file reports.
pub fn analyze_files<S: TableSink>(
    sink: &mut S,
    log_files: &[String],
    filters: &FilterSet,
    show_main_table: bool,
) -> Result<Vec<FileReport>> {
    let mut reports = Vec::with_capacity(log_files.len());

    for (idx, log_file) in log_files.iter().enumerate() {
        eprintln!("[{}/{}] Processing: {}", idx + 1, log_files.len(), log_file);

        let text = read_log_file(log_file)
            .with_context(|| format!("Failed to load log file: {}", log_file))?;
        let log = parse_log(&text).with_context(|| format!("Malformed log file: {}", log_file))?;

        let views = filters.run(&log);
        if log.rows.is_empty() {
            sink.notice(&format!("No data found in {}.", log_file))?;
        } else {
            render_views(sink, &log, &views, show_main_table)?;
        }

        let warnings: usize = views
            .iter()
            .filter_map(|v| v.outcome.as_ref().ok())
            .map(|r| r.warnings.len())
            .sum();
        eprintln!(
            "  {} parsed, {} across views",
            count_of(log.rows.len(), "row"),
            count_of(warnings, "row warning")
        );

        reports.push(FileReport::new(log_file, &log, &views));
    }

    Ok(reports)
}

/// Run the `analyze` command over log files given on the command line.
///
/// # Arguments
///
/// * `log_files` - Paths to `.log`, `.log.gz` or `.log.zst` exports
/// * `filters` - View slugs to run; `None` or empty runs every view
/// * `show_main_table` - Print the unfiltered table before the views
/// * `export` - Optional output path for a CSV or JSON report
/// * `format` - Export format; inferred from the `export` extension when `None`
///
/// # Errors
///
/// Fails on the first unreadable or malformed file, an unknown filter slug,
/// or an export that cannot be written.
pub fn run(
    log_files: &[String],
    filters: Option<&[String]>,
    show_main_table: bool,
    export: Option<&str>,
    format: Option<&str>,
) -> Result<()> {
    let filters = FilterSet::from_slugs(filters.unwrap_or_default())?;
    let mut sink = ConsoleSink::new(io::stdout());
    let reports = analyze_files(&mut sink, log_files, &filters, show_main_table)?;

    if let Some(output) = export {
        let path = Path::new(output);
        let format = ExportFormat::resolve(format, path);
        let report = Report::new(reports);

        eprintln!(
            "\nExporting views to {} (format: {})...",
            output,
            format.as_str()
        );
        write_report(&report, path, format)?;
        eprintln!("Exported {}", count_of(report.exported_rows(), "row"));
    }

    Ok(())
}
