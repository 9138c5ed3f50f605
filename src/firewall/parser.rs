//! Extraction of the tabular data section from a firewall log export.
//!
//! An export looks like this:
//!
//! ```text
//! #Version: 1.5
//! #Software: Example Firewall
//! # Fields: Date | Time | Action | Protocol | Src IP | Dst IP | Src Port | Dst Port | TCP Flags | Info
//! 2024-01-01 10:00:00 ALLOW TCP 10.0.0.2 203.0.113.5 51000 22 S inbound ssh session
//! # End of log
//! ```
//!
//! The header is pipe-delimited, data lines are whitespace-delimited. When a
//! `TCP Flags` column exists, everything after it on a data line is folded
//! into a single free-text cell.

use crate::firewall::error::LogError;
use crate::firewall::types::{Header, ParsedLog, Row, TCP_FLAGS_COLUMN};
use tracing::debug;

pub const FIELDS_MARKER: &str = "# Fields:";
pub const END_MARKER: &str = "# End of log";

/// Slice out the text between `# Fields:` and the following `# End of log`.
pub fn data_section(text: &str) -> Result<&str, LogError> {
    let start = text
        .find(FIELDS_MARKER)
        .ok_or(LogError::MissingFieldsMarker)?
        + FIELDS_MARKER.len();
    let end = text[start..]
        .find(END_MARKER)
        .ok_or(LogError::MissingEndMarker)?;
    Ok(text[start..start + end].trim())
}

/// Split the pipe-delimited header line into trimmed column names.
///
/// Empty cells at either end (a leading or trailing `|`) are ignored. An
/// empty cell between two names would shift every later column, so it is
/// rejected.
pub fn parse_header(line: &str) -> Result<Header, LogError> {
    let cells: Vec<&str> = line.split('|').map(str::trim).collect();
    let first = cells.iter().position(|c| !c.is_empty());
    let last = cells.iter().rposition(|c| !c.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Err(LogError::EmptyHeader);
    };

    let mut columns = Vec::with_capacity(last - first + 1);
    for (offset, cell) in cells[first..=last].iter().enumerate() {
        if cell.is_empty() {
            return Err(LogError::UnnamedColumn {
                position: offset + 1,
            });
        }
        columns.push(cell.to_string());
    }
    Header::new(columns)
}

/// Tokenize a data line, folding the free-text tail after `TCP Flags`.
pub fn parse_row(line_number: usize, line: &str, tcp_flags_index: Option<usize>) -> Row {
    let mut cells: Vec<String> = line.split_whitespace().map(str::to_string).collect();

    if let Some(flags) = tcp_flags_index {
        let info = flags + 1;
        if cells.len() > info {
            let merged = cells[info..].join(" ");
            cells.truncate(info);
            cells.push(merged);
        }
        // Rows ending at or before the Info column stay short.
    }

    Row::new(line_number, cells)
}

/// Parse a complete export into its header and data rows.
pub fn parse_log(text: &str) -> Result<ParsedLog, LogError> {
    let section = data_section(text)?;
    let mut lines = section.lines();

    let header = parse_header(lines.next().ok_or(LogError::EmptyHeader)?)?;
    let tcp_flags_index = header.position(TCP_FLAGS_COLUMN).map(|c| c.index);

    let mut rows = Vec::new();
    let mut blank_lines = 0;
    for (idx, line) in lines.enumerate() {
        if line.trim().is_empty() {
            blank_lines += 1;
            continue;
        }
        // The header occupies line 1 of the section.
        rows.push(parse_row(idx + 2, line, tcp_flags_index));
    }

    debug!(
        columns = header.len(),
        rows = rows.len(),
        blank_lines,
        tcp_flags = ?tcp_flags_index,
        "parsed log data section"
    );

    Ok(ParsedLog {
        header,
        rows,
        tcp_flags_index,
        blank_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
#Version: 1.5
# Fields: Date | Time | Action | Protocol | Src IP | Dst IP | Src Port | Dst Port | TCP Flags | Info
2024-01-01 10:00:00 ALLOW TCP 10.0.0.2 203.0.113.5 51000 22 S inbound   ssh session

2024-01-01 10:00:05 BLOCK UDP 10.0.0.3 8.8.8.8 53000 53 - dns
# End of log
trailing noise
";

    #[test]
    fn test_parse_header_and_rows() {
        let log = parse_log(SAMPLE).unwrap();
        assert_eq!(log.header.len(), 10);
        assert_eq!(log.header.columns()[0], "Date");
        assert_eq!(log.header.columns()[9], "Info");
        assert_eq!(log.rows.len(), 2);
        assert_eq!(log.tcp_flags_index, Some(8));
        assert_eq!(log.blank_lines, 1);
    }

    #[test]
    fn test_info_column_merged_and_truncated() {
        let log = parse_log(SAMPLE).unwrap();
        let first = &log.rows[0];
        assert_eq!(first.len(), 10);
        assert_eq!(first.cells[9], "inbound ssh session");
        assert_eq!(first.cells[8], "S");
        assert_eq!(log.rows[1].cells[9], "dns");
    }

    #[test]
    fn test_row_line_numbers() {
        let log = parse_log(SAMPLE).unwrap();
        assert_eq!(log.rows[0].line, 2);
        assert_eq!(log.rows[1].line, 4);
    }

    #[test]
    fn test_rows_without_tcp_flags_are_raw_tokens() {
        let text = "# Fields: Dst Port | Dst IP\n22 1.2.3.4 extra tokens\n# End of log";
        let log = parse_log(text).unwrap();
        assert_eq!(log.tcp_flags_index, None);
        assert_eq!(log.rows[0].cells, vec!["22", "1.2.3.4", "extra", "tokens"]);
    }

    #[test]
    fn test_short_row_kept_as_is() {
        let text = "# Fields: Action | TCP Flags | Info\nALLOW\n# End of log";
        let log = parse_log(text).unwrap();
        assert_eq!(log.rows[0].cells, vec!["ALLOW"]);
        assert_eq!(log.short_rows(), 1);
    }

    #[test]
    fn test_row_exactly_up_to_flags() {
        let row = parse_row(2, "ALLOW S", Some(1));
        assert_eq!(row.cells, vec!["ALLOW", "S"]);
    }

    #[test]
    fn test_missing_end_marker() {
        let text = "# Fields: Action\nALLOW\n";
        assert_eq!(parse_log(text).unwrap_err(), LogError::MissingEndMarker);
    }

    #[test]
    fn test_missing_fields_marker() {
        let text = "Action\nALLOW\n# End of log";
        assert_eq!(parse_log(text).unwrap_err(), LogError::MissingFieldsMarker);
    }

    #[test]
    fn test_end_marker_before_fields_is_missing() {
        let text = "# End of log\n# Fields: Action\nALLOW\n";
        assert_eq!(parse_log(text).unwrap_err(), LogError::MissingEndMarker);
    }

    #[test]
    fn test_empty_section_reports_empty_header() {
        let text = "# Fields:   \n# End of log";
        assert_eq!(parse_log(text).unwrap_err(), LogError::EmptyHeader);
    }

    #[test]
    fn test_edge_pipes_ignored() {
        let header = parse_header("| Action | Protocol |").unwrap();
        assert_eq!(header.columns(), ["Action", "Protocol"]);
    }

    #[test]
    fn test_interior_empty_column_rejected() {
        assert_eq!(
            parse_header("Action || Protocol").unwrap_err(),
            LogError::UnnamedColumn { position: 2 }
        );
        let text = "# Fields: Dst Port |  | Dst IP\n22 1.2.3.4\n# End of log";
        assert_eq!(
            parse_log(text).unwrap_err(),
            LogError::UnnamedColumn { position: 2 }
        );
    }

    #[test]
    fn test_header_only_is_zero_rows() {
        let text = "# Fields: Action | Protocol |\n# End of log";
        let log = parse_log(text).unwrap();
        assert_eq!(log.header.columns(), ["Action", "Protocol"]);
        assert!(log.rows.is_empty());
    }
}
