//! CSV and JSON export of filtered views.
//!
//! JSON keeps everything (rows, per-row warnings, filter errors) in one
//! document. CSV writes one record per surviving row, prefixed with the
//! source file, the view slug and the data-section line number; a header
//! record is emitted for each file since exports may differ in columns.

use crate::filters::View;
use crate::firewall::types::ParsedLog;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Use the explicit format if given, otherwise `.csv` means CSV and
    /// anything else JSON.
    pub fn resolve(explicit: Option<&str>, path: &Path) -> Self {
        match explicit {
            Some(f) if f.eq_ignore_ascii_case("csv") => Self::Csv,
            Some(_) => Self::Json,
            None => {
                if path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
                {
                    Self::Csv
                } else {
                    Self::Json
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WarningRecord {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowRecord {
    pub line: usize,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewReport {
    pub slug: String,
    pub title: String,
    pub row_count: usize,
    pub rows: Vec<RowRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WarningRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub header: Vec<String>,
    pub row_count: usize,
    pub views: Vec<ViewReport>,
    /// Filters that could not run against this file.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl FileReport {
    pub fn new(file: &str, log: &ParsedLog, views: &[View<'_>]) -> Self {
        let mut reports = Vec::with_capacity(views.len());
        let mut errors = Vec::new();

        for view in views {
            match &view.outcome {
                Ok(result) => {
                    reports.push(ViewReport {
                        slug: view.filter.slug().to_string(),
                        title: view.filter.title().to_string(),
                        row_count: result.rows.len(),
                        rows: result
                            .rows
                            .iter()
                            .map(|r| RowRecord {
                                line: r.line,
                                cells: r.cells.clone(),
                            })
                            .collect(),
                        warnings: result
                            .warnings
                            .iter()
                            .map(|w| WarningRecord {
                                line: w.line,
                                message: w.issue.to_string(),
                            })
                            .collect(),
                    });
                }
                Err(e) => errors.push(e.to_string()),
            }
        }

        Self {
            file: file.to_string(),
            header: log.header.columns().to_vec(),
            row_count: log.rows.len(),
            views: reports,
            errors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: String,
    pub files: Vec<FileReport>,
}

impl Report {
    pub fn new(files: Vec<FileReport>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            files,
        }
    }

    /// Number of exported rows across every file and view.
    pub fn exported_rows(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.views)
            .map(|v| v.row_count)
            .sum()
    }
}

/// Write a report to `path` in the given format.
pub fn write_report(report: &Report, path: &Path, format: ExportFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    match format {
        ExportFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(file);
            for file_report in &report.files {
                let mut header = vec!["file".to_string(), "view".into(), "line".into()];
                header.extend(file_report.header.iter().cloned());
                writer
                    .write_record(&header)
                    .context("Failed to write CSV header")?;

                let width = file_report.header.len();
                for view in &file_report.views {
                    for row in &view.rows {
                        let mut record = vec![
                            file_report.file.clone(),
                            view.slug.clone(),
                            row.line.to_string(),
                        ];
                        record.extend(
                            (0..width).map(|i| row.cells.get(i).cloned().unwrap_or_default()),
                        );
                        writer
                            .write_record(&record)
                            .context("Failed to write CSV record")?;
                    }
                }
            }
            writer.flush().context("Failed to flush CSV writer")?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(file, report).context("Failed to write JSON output")?;
        }
    }
    Ok(())
}
