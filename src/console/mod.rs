//! Terminal collaborators for the interactive session.
//!
//! The session logic only talks to two traits:
//!
//! - [`LogSource`] - yields log exports (or the end of the session)
//! - [`TableSink`] - renders titled tables and notices
//!
//! [`PromptSource`] and [`ConsoleSink`] implement them over stdin/stdout,
//! but any reader/writer works, which is how the session is tested.

pub mod sink;
pub mod source;

pub use sink::{ConsoleSink, TableSink};
pub use source::{LoadedLog, LogSource, PromptSource};
