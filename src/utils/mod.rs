//! Utility functions and helpers.
//!
//! - [`reader`] - Path validation and reading of (possibly compressed) exports
//! - [`export`] - CSV/JSON export of filtered views
//! - [`format`] - Count formatting
//! - [`logging`] - `tracing` subscriber setup
//!
//! # Examples
//!
//! ```no_run
//! use fwlog_inspector::firewall::parse_log;
//! use fwlog_inspector::utils::reader::read_log_file;
//!
//! // Plain, .log.gz and .log.zst exports all read the same way
//! let text = read_log_file("firewall.log.gz").unwrap();
//! let log = parse_log(&text).unwrap();
//! println!("{} rows", log.rows.len());
//! ```

pub mod export;
pub mod format;
pub mod logging;
pub mod reader;
