//! Firewall log export parsing.
//!
//! - [`parser`] - Locates the data section and tokenizes header and rows
//! - [`types`] - Header, row and column lookup types
//! - [`error`] - Malformed-log errors

pub mod error;
pub mod parser;
pub mod types;

pub use error::LogError;
pub use parser::parse_log;
pub use types::{Column, Header, ParsedLog, Row};
