//! Command implementations.
//!
//! - [`interactive`] - Prompt for exports one at a time and render every view (default)
//! - [`analyze`] - Render views for exports given on the command line, with optional CSV/JSON export
//! - [`list_filters`] - Show the available views and the columns they need

pub mod analyze;
pub mod interactive;
pub mod list_filters;
