//! Errors raised while turning export text into a [`ParsedLog`](super::types::ParsedLog).

use thiserror::Error;

/// The export is not in the expected `# Fields:` ... `# End of log` shape.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogError {
    #[error("malformed log: no '# Fields:' marker found")]
    MissingFieldsMarker,

    #[error("malformed log: no '# End of log' marker after '# Fields:'")]
    MissingEndMarker,

    #[error("malformed log: header line has no column names")]
    EmptyHeader,

    #[error("malformed log: header column {position} has no name")]
    UnnamedColumn { position: usize },

    #[error("malformed log: column '{name}' appears more than once in the header")]
    DuplicateColumn { name: String },
}
