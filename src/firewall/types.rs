//! Data structures for a parsed firewall log export.
//!
//! A log export is reduced to a [`Header`] naming the columns and a list of
//! [`Row`]s whose cells are positionally aligned to it. Rows are not
//! guaranteed to be as long as the header, so every cell lookup returns an
//! `Option`.

use crate::firewall::error::LogError;

/// Name of the column whose successor holds free text.
pub const TCP_FLAGS_COLUMN: &str = "TCP Flags";

/// A named column resolved against a [`Header`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'a> {
    pub name: &'a str,
    pub index: usize,
}

/// Ordered, unique column names from the `# Fields:` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Build a header, rejecting empty or duplicated column lists.
    pub fn new(columns: Vec<String>) -> Result<Self, LogError> {
        if columns.is_empty() {
            return Err(LogError::EmptyHeader);
        }
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(LogError::DuplicateColumn { name: name.clone() });
            }
        }
        Ok(Self { columns })
    }

    /// Column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Look up a column by exact name.
    ///
    /// # Examples
    ///
    /// ```
    /// use fwlog_inspector::firewall::Header;
    ///
    /// let header = Header::new(vec!["Dst Port".into(), "Dst IP".into()]).unwrap();
    /// assert_eq!(header.position("Dst IP").map(|c| c.index), Some(1));
    /// assert!(header.position("dst ip").is_none());
    /// ```
    pub fn position<'a>(&self, name: &'a str) -> Option<Column<'a>> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|index| Column { name, index })
    }
}

/// One data line of the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number within the data section (the header is line 1).
    pub line: usize,
    pub cells: Vec<String>,
}

impl Row {
    /// Wrap already-tokenized cells. `line` counts the header as line 1.
    pub fn new(line: usize, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    /// Cell value at a column, or `None` when the row is too short.
    pub fn get(&self, column: Column<'_>) -> Option<&str> {
        self.cells.get(column.index).map(String::as_str)
    }

    /// Number of cells, which may differ from the header width.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Result of parsing one log export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLog {
    pub header: Header,
    pub rows: Vec<Row>,
    /// Position of the `TCP Flags` column, when the export has one.
    pub tcp_flags_index: Option<usize>,
    /// Blank lines dropped from the data section.
    pub blank_lines: usize,
}

impl ParsedLog {
    /// Rows that are shorter than the header.
    pub fn short_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.len() < self.header.len())
            .count()
    }
}
