//! Pre-defined security views over a parsed firewall log.
//!
//! Every [`Filter`] is a stateless, order-preserving selection over the rows
//! of a [`ParsedLog`]. Columns are resolved once against the header; a
//! missing column fails the whole filter, while a row that cannot be
//! classified (too short, or an unparsable address) is skipped and reported
//! as a [`RowWarning`].
//!
//! | Slug | Title | Selects |
//! |---|---|---|
//! | `ssh-unusual` | SSH Unusual Attempts | `Dst Port` 22 to a non-`192.168` destination |
//! | `sql-unusual` | SQL Unusual Access | `Dst Port` 1433 to a non-`192.168` destination |
//! | `port-80` | Port 80 Attempts | `Dst Port` 80 to a non-`192.168` destination |
//! | `allowed` | Allowed Connections | `Action` is `ALLOW` |
//! | `blocked` | Blocked Connections | `Action` is `BLOCK` |
//! | `tcp` | TCP Connections | `Protocol` is `TCP` |
//! | `udp` | UDP Connections | `Protocol` is `UDP` |
//! | `public` | Public Connection Attempts | `Dst IP` outside the RFC 1918 ranges |

pub mod network;

use crate::firewall::types::{Column, Header, ParsedLog, Row};
use std::net::Ipv4Addr;
use thiserror::Error;
use tracing::warn;

pub const DST_PORT: &str = "Dst Port";
pub const DST_IP: &str = "Dst IP";
pub const ACTION: &str = "Action";
pub const PROTOCOL: &str = "Protocol";

/// Destination prefix treated as the local network by the port views.
const LAN_PREFIX: &str = "192.168";

/// A filter could not run against this header.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("{filter}: required column '{column}' missing from header")]
    MissingColumn {
        filter: &'static str,
        column: &'static str,
    },

    #[error("unknown filter '{slug}' (valid filters: {valid})")]
    UnknownFilter { slug: String, valid: String },
}

/// Why a row was left out of a view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowIssue {
    #[error("no value for column '{column}'")]
    MissingCell { column: &'static str },

    #[error("'{value}' is not a dotted-quad IPv4 address")]
    InvalidAddress { value: String },
}

/// A row excluded from a view, with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    pub line: usize,
    pub issue: RowIssue,
}

/// Surviving rows of one filter, in their original order.
#[derive(Debug, Clone, Default)]
pub struct FilterResult<'a> {
    pub rows: Vec<&'a Row>,
    pub warnings: Vec<RowWarning>,
}

enum Rule {
    /// Destination port matches and the destination is not on the LAN.
    UnusualPort(&'static str),
    Equals {
        column: &'static str,
        value: &'static str,
    },
    PublicDestination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    SshUnusual,
    SqlUnusual,
    Port80,
    Allowed,
    Blocked,
    Tcp,
    Udp,
    PublicAttempts,
}

impl Filter {
    /// Every filter, in display order.
    pub const ALL: [Filter; 8] = [
        Filter::SshUnusual,
        Filter::SqlUnusual,
        Filter::Port80,
        Filter::Allowed,
        Filter::Blocked,
        Filter::Tcp,
        Filter::Udp,
        Filter::PublicAttempts,
    ];

    /// Stable command-line name, as accepted by `--filter`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fwlog_inspector::filters::Filter;
    ///
    /// assert_eq!(Filter::SshUnusual.slug(), "ssh-unusual");
    /// assert_eq!(Filter::PublicAttempts.slug(), "public");
    /// ```
    pub const fn slug(self) -> &'static str {
        match self {
            Filter::SshUnusual => "ssh-unusual",
            Filter::SqlUnusual => "sql-unusual",
            Filter::Port80 => "port-80",
            Filter::Allowed => "allowed",
            Filter::Blocked => "blocked",
            Filter::Tcp => "tcp",
            Filter::Udp => "udp",
            Filter::PublicAttempts => "public",
        }
    }

    /// Heading printed above the view's table.
    pub const fn title(self) -> &'static str {
        match self {
            Filter::SshUnusual => "SSH Unusual Attempts",
            Filter::SqlUnusual => "SQL Unusual Access",
            Filter::Port80 => "Port 80 Attempts",
            Filter::Allowed => "Allowed Connections",
            Filter::Blocked => "Blocked Connections",
            Filter::Tcp => "TCP Connections",
            Filter::Udp => "UDP Connections",
            Filter::PublicAttempts => "Public Connection Attempts",
        }
    }

    /// Human-readable predicate, as shown by `list-filters`.
    pub const fn description(self) -> &'static str {
        match self {
            Filter::SshUnusual => "Dst Port == 22 and Dst IP not in 192.168.*",
            Filter::SqlUnusual => "Dst Port == 1433 and Dst IP not in 192.168.*",
            Filter::Port80 => "Dst Port == 80 and Dst IP not in 192.168.*",
            Filter::Allowed => "Action == ALLOW",
            Filter::Blocked => "Action == BLOCK",
            Filter::Tcp => "Protocol == TCP",
            Filter::Udp => "Protocol == UDP",
            Filter::PublicAttempts => {
                "Dst IP outside 10.0.0.0/8, 172.16.0.0/12 and 192.168.0.0/16"
            }
        }
    }

    /// Look up a filter by its slug. Matching is exact.
    ///
    /// # Examples
    ///
    /// ```
    /// use fwlog_inspector::filters::Filter;
    ///
    /// assert_eq!(Filter::from_slug("tcp"), Some(Filter::Tcp));
    /// assert_eq!(Filter::from_slug("TCP"), None);
    /// ```
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.slug() == slug)
    }

    const fn rule(self) -> Rule {
        match self {
            Filter::SshUnusual => Rule::UnusualPort("22"),
            Filter::SqlUnusual => Rule::UnusualPort("1433"),
            Filter::Port80 => Rule::UnusualPort("80"),
            Filter::Allowed => Rule::Equals {
                column: ACTION,
                value: "ALLOW",
            },
            Filter::Blocked => Rule::Equals {
                column: ACTION,
                value: "BLOCK",
            },
            Filter::Tcp => Rule::Equals {
                column: PROTOCOL,
                value: "TCP",
            },
            Filter::Udp => Rule::Equals {
                column: PROTOCOL,
                value: "UDP",
            },
            Filter::PublicAttempts => Rule::PublicDestination,
        }
    }

    /// Columns this filter reads.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Filter::SshUnusual | Filter::SqlUnusual | Filter::Port80 => &[DST_PORT, DST_IP],
            Filter::Allowed | Filter::Blocked => &[ACTION],
            Filter::Tcp | Filter::Udp => &[PROTOCOL],
            Filter::PublicAttempts => &[DST_IP],
        }
    }

    /// Run the filter over a header and its rows.
    pub fn apply<'a>(
        self,
        header: &Header,
        rows: &'a [Row],
    ) -> Result<FilterResult<'a>, FilterError> {
        let result = match self.rule() {
            Rule::UnusualPort(port) => {
                let port_col = self.require(header, DST_PORT)?;
                let ip_col = self.require(header, DST_IP)?;
                select(rows, |row| {
                    if cell(row, port_col, DST_PORT)? != port {
                        return Ok(false);
                    }
                    Ok(!cell(row, ip_col, DST_IP)?.starts_with(LAN_PREFIX))
                })
            }
            Rule::Equals { column, value } => {
                let col = self.require(header, column)?;
                select(rows, |row| Ok(cell(row, col, column)? == value))
            }
            Rule::PublicDestination => {
                let ip_col = self.require(header, DST_IP)?;
                select(rows, |row| {
                    let value = cell(row, ip_col, DST_IP)?;
                    let addr: Ipv4Addr =
                        value.parse().map_err(|_| RowIssue::InvalidAddress {
                            value: value.to_string(),
                        })?;
                    Ok(!network::is_private(addr))
                })
            }
        };

        for w in &result.warnings {
            warn!(filter = self.slug(), line = w.line, "row skipped: {}", w.issue);
        }
        Ok(result)
    }

    /// Convenience wrapper over [`Filter::apply`] for a whole parsed log.
    pub fn apply_log(self, log: &ParsedLog) -> Result<FilterResult<'_>, FilterError> {
        self.apply(&log.header, &log.rows)
    }

    fn require(
        self,
        header: &Header,
        column: &'static str,
    ) -> Result<Column<'static>, FilterError> {
        header.position(column).ok_or(FilterError::MissingColumn {
            filter: self.title(),
            column,
        })
    }
}

fn cell<'r>(row: &'r Row, col: Column<'_>, name: &'static str) -> Result<&'r str, RowIssue> {
    row.get(col).ok_or(RowIssue::MissingCell { column: name })
}

fn select<'a, F>(rows: &'a [Row], mut keep: F) -> FilterResult<'a>
where
    F: FnMut(&Row) -> Result<bool, RowIssue>,
{
    let mut result = FilterResult::default();
    for row in rows {
        match keep(row) {
            Ok(true) => result.rows.push(row),
            Ok(false) => {}
            Err(issue) => result.warnings.push(RowWarning {
                line: row.line,
                issue,
            }),
        }
    }
    result
}

/// One filter's outcome against a log.
#[derive(Debug)]
pub struct View<'a> {
    pub filter: Filter,
    pub outcome: Result<FilterResult<'a>, FilterError>,
}

/// An ordered selection of filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterSet {
    /// Every filter in display order.
    pub fn all() -> Self {
        Self {
            filters: Filter::ALL.to_vec(),
        }
    }

    /// Build a selection from slugs; an empty list selects every filter.
    pub fn from_slugs<I, S>(slugs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filters = Vec::new();
        for slug in slugs {
            let slug = slug.as_ref().trim();
            let filter = Filter::from_slug(slug).ok_or_else(|| FilterError::UnknownFilter {
                slug: slug.to_string(),
                valid: Filter::ALL.map(Filter::slug).join(", "),
            })?;
            if !filters.contains(&filter) {
                filters.push(filter);
            }
        }
        if filters.is_empty() {
            return Ok(Self::all());
        }
        Ok(Self { filters })
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Run every selected filter; a failing filter does not stop the others.
    pub fn run<'a>(&self, log: &'a ParsedLog) -> Vec<View<'a>> {
        self.filters
            .iter()
            .map(|&filter| View {
                filter,
                outcome: filter.apply_log(log),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cols: &[&str]) -> Header {
        Header::new(cols.iter().map(|c| c.to_string()).collect()).unwrap()
    }

    fn rows(data: &[&[&str]]) -> Vec<Row> {
        data.iter()
            .enumerate()
            .map(|(i, cells)| Row::new(i + 2, cells.iter().map(|c| c.to_string()).collect()))
            .collect()
    }

    fn standard_header() -> Header {
        header(&["Dst Port", "Dst IP", "Action", "Protocol"])
    }

    #[test]
    fn test_ssh_unusual_example() {
        let h = standard_header();
        let r = rows(&[
            &["22", "203.0.113.5", "ALLOW", "TCP"],
            &["22", "192.168.1.5", "ALLOW", "TCP"],
        ]);
        let result = Filter::SshUnusual.apply(&h, &r).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].cells[1], "203.0.113.5");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_port_filters_match_exact_port() {
        let h = standard_header();
        let r = rows(&[
            &["1433", "10.0.0.9", "ALLOW", "TCP"],
            &["80", "172.16.4.4", "BLOCK", "TCP"],
            &["8080", "8.8.8.8", "BLOCK", "TCP"],
        ]);
        assert_eq!(Filter::SqlUnusual.apply(&h, &r).unwrap().rows.len(), 1);
        assert_eq!(Filter::Port80.apply(&h, &r).unwrap().rows.len(), 1);
        assert_eq!(Filter::SshUnusual.apply(&h, &r).unwrap().rows.len(), 0);
    }

    #[test]
    fn test_public_attempts() {
        let h = standard_header();
        let r = rows(&[
            &["53", "10.1.2.3", "ALLOW", "UDP"],
            &["53", "8.8.8.8", "ALLOW", "UDP"],
            &["443", "172.20.0.1", "ALLOW", "TCP"],
            &["443", "192.168.0.10", "ALLOW", "TCP"],
        ]);
        let result = Filter::PublicAttempts.apply(&h, &r).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].cells[1], "8.8.8.8");
    }

    #[test]
    fn test_public_attempts_invalid_address_warns() {
        let h = standard_header();
        let r = rows(&[
            &["53", "not-an-ip", "ALLOW", "UDP"],
            &["53", "1.1.1.1", "ALLOW", "UDP"],
        ]);
        let result = Filter::PublicAttempts.apply(&h, &r).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(
            result.warnings,
            vec![RowWarning {
                line: 2,
                issue: RowIssue::InvalidAddress {
                    value: "not-an-ip".to_string()
                }
            }]
        );
    }

    #[test]
    fn test_short_row_warns_instead_of_panicking() {
        let h = standard_header();
        let r = rows(&[&["22"], &["22", "203.0.113.9", "BLOCK", "TCP"]]);
        let result = Filter::SshUnusual.apply(&h, &r).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(
            result.warnings[0].issue,
            RowIssue::MissingCell { column: DST_IP }
        );

        let result = Filter::Tcp.apply(&h, &r).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_short_row_with_other_port_is_not_a_warning() {
        let h = header(&["Dst Port", "Dst IP", "Action"]);
        let r = rows(&[&["80"]]);

        for filter in [Filter::SshUnusual, Filter::SqlUnusual] {
            let result = filter.apply(&h, &r).unwrap();
            assert!(result.rows.is_empty());
            assert!(result.warnings.is_empty(), "{} warned", filter.slug());
        }

        let result = Filter::Port80.apply(&h, &r).unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(
            result.warnings[0].issue,
            RowIssue::MissingCell { column: DST_IP }
        );
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let h = header(&["Dst Port", "Action"]);
        let r = rows(&[&["22", "ALLOW"]]);
        let err = Filter::SshUnusual.apply(&h, &r).unwrap_err();
        assert_eq!(
            err,
            FilterError::MissingColumn {
                filter: "SSH Unusual Attempts",
                column: DST_IP
            }
        );
        assert!(Filter::Allowed.apply(&h, &r).is_ok());
    }

    #[test]
    fn test_allowed_and_blocked_are_disjoint() {
        let h = standard_header();
        let r = rows(&[
            &["1", "8.8.8.8", "ALLOW", "TCP"],
            &["2", "8.8.8.8", "BLOCK", "UDP"],
            &["3", "8.8.8.8", "DROP", "ICMP"],
            &["4", "8.8.8.8", "allow", "tcp"],
        ]);
        let allowed = Filter::Allowed.apply(&h, &r).unwrap();
        let blocked = Filter::Blocked.apply(&h, &r).unwrap();
        assert_eq!(allowed.rows.len(), 1);
        assert_eq!(blocked.rows.len(), 1);
        for row in &allowed.rows {
            assert!(!blocked.rows.iter().any(|b| std::ptr::eq(*b, *row)));
        }

        let tcp = Filter::Tcp.apply(&h, &r).unwrap();
        let udp = Filter::Udp.apply(&h, &r).unwrap();
        assert_eq!(tcp.rows.len(), 1);
        assert_eq!(udp.rows.len(), 1);
    }

    #[test]
    fn test_order_preserved_and_subset() {
        let h = standard_header();
        let r = rows(&[
            &["22", "8.8.8.8", "ALLOW", "TCP"],
            &["80", "8.8.4.4", "BLOCK", "TCP"],
            &["22", "1.1.1.1", "ALLOW", "UDP"],
        ]);
        for filter in Filter::ALL {
            let result = filter.apply(&h, &r).unwrap();
            assert!(result.rows.len() <= r.len());
            let lines: Vec<usize> = result.rows.iter().map(|row| row.line).collect();
            let mut sorted = lines.clone();
            sorted.sort_unstable();
            assert_eq!(lines, sorted, "{} reordered rows", filter.slug());
        }
    }

    #[test]
    fn test_from_slugs() {
        let set = FilterSet::from_slugs(["tcp", "public", "tcp"]).unwrap();
        assert_eq!(set.filters(), [Filter::Tcp, Filter::PublicAttempts]);

        let empty: [&str; 0] = [];
        assert_eq!(FilterSet::from_slugs(empty).unwrap(), FilterSet::all());

        let err = FilterSet::from_slugs(["icmp"]).unwrap_err();
        assert!(err.to_string().contains("unknown filter 'icmp'"));
        assert!(err.to_string().contains("ssh-unusual"));
    }

    #[test]
    fn test_slug_round_trip() {
        for filter in Filter::ALL {
            assert_eq!(Filter::from_slug(filter.slug()), Some(filter));
        }
    }

    #[test]
    fn test_run_reports_each_view() {
        let log = ParsedLog {
            header: header(&["Action", "Protocol"]),
            rows: rows(&[&["ALLOW", "TCP"]]),
            tcp_flags_index: None,
            blank_lines: 0,
        };
        let views = FilterSet::all().run(&log);
        assert_eq!(views.len(), 8);
        assert!(views[0].outcome.is_err());
        assert_eq!(views[3].outcome.as_ref().unwrap().rows.len(), 1);
    }
}
