//! # fwlog-inspector
//!
//! Command-line inspector for firewall log exports.
//!
//! ## Overview
//!
//! A firewall export carries a tabular section between a `# Fields:` line
//! (pipe-delimited column names) and a `# End of log` line
//! (whitespace-delimited data). This crate parses that section and runs a
//! fixed set of security views over it:
//!
//! - **SSH Unusual Attempts** - port 22 to destinations outside `192.168`
//! - **SQL Unusual Access** - port 1433 to destinations outside `192.168`
//! - **Port 80 Attempts** - port 80 to destinations outside `192.168`
//! - **Allowed / Blocked Connections** - by `Action`
//! - **TCP / UDP Connections** - by `Protocol`
//! - **Public Connection Attempts** - destinations outside RFC 1918 ranges
//!
//! ## Architecture
//!
//! - [`firewall`] - Data-section parser and the header/row types
//! - [`filters`] - The named views and their predicates
//! - [`console`] - Input provider and table sink for the interactive session
//! - [`commands`] - `interactive`, `analyze` and `list-filters`
//! - [`utils`] - File reading, export, formatting and logging helpers
//!
//! ## Example Usage
//!
//! ```bash
//! # Prompt for exports one at a time (default)
//! fwlog
//!
//! # Non-interactive, with export
//! fwlog analyze firewall.log --filter ssh-unusual,public --export views.json
//!
//! # Show the available views
//! fwlog list-filters
//! ```
//!
//! ## Library Usage
//!
//! ```
//! use fwlog_inspector::filters::Filter;
//! use fwlog_inspector::firewall::parse_log;
//!
//! let text = "# Fields: Dst Port | Dst IP | Action | Protocol
//! 22 203.0.113.5 ALLOW TCP
//! 22 192.168.1.5 ALLOW TCP\n# End of log";
//!
//! let log = parse_log(text).unwrap();
//! let ssh = Filter::SshUnusual.apply_log(&log).unwrap();
//! assert_eq!(ssh.rows.len(), 1);
//! ```

pub mod commands;
pub mod console;
pub mod filters;
pub mod firewall;
pub mod utils;
