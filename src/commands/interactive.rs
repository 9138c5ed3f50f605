//! Interactive operator session.
//!
//! Repeatedly asks for a log export, renders the main table followed by
//! every selected view, then asks whether to continue.
//!
//! # Usage
//!
//! ```bash
//! # Default when no subcommand is given
//! fwlog
//!
//! # Only a subset of views, no final keypress
//! fwlog interactive --filter ssh-unusual,public --no-pause
//! ```
//!
//! A file that cannot be parsed (missing `# Fields:` / `# End of log`
//! markers, bad header) is reported and the session asks for another path.
//! A filter whose columns are missing is reported in place of its table;
//! the other views still render.

use crate::console::{ConsoleSink, LogSource, PromptSource, TableSink};
use crate::filters::{FilterSet, View};
use crate::firewall::{parse_log, ParsedLog};
use crate::utils::format::count_of;
use anyhow::Result;
use std::io;
use tracing::{info, warn};

pub const MAIN_TABLE_TITLE: &str = "Main Table";

/// Session settings taken from the command line.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub filters: FilterSet,
    pub show_main_table: bool,
    pub pause_on_exit: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            filters: FilterSet::all(),
            show_main_table: true,
            pause_on_exit: true,
        }
    }
}

/// What happened to one loaded export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    NoData,
    Malformed,
}

/// Render the main table and each view of a parsed log.
pub fn render_views<S: TableSink>(
    sink: &mut S,
    log: &ParsedLog,
    views: &[View<'_>],
    show_main_table: bool,
) -> Result<()> {
    if show_main_table {
        let all: Vec<_> = log.rows.iter().collect();
        sink.render(MAIN_TABLE_TITLE, &log.header, &all, 0)?;
    }

    for view in views {
        match &view.outcome {
            Ok(result) => sink.render(
                view.filter.title(),
                &log.header,
                &result.rows,
                result.warnings.len(),
            )?,
            Err(e) => {
                warn!(filter = view.filter.slug(), "{}", e);
                sink.notice(&format!("\nError: {}", e))?;
            }
        }
    }
    Ok(())
}

/// Parse one export and render it.
pub fn process_text<S: TableSink>(
    sink: &mut S,
    name: &str,
    text: &str,
    options: &SessionOptions,
) -> Result<Outcome> {
    let log = match parse_log(text) {
        Ok(log) => log,
        Err(e) => {
            warn!(file = name, "{}", e);
            sink.notice(&format!("Error in {}: {}", name, e))?;
            return Ok(Outcome::Malformed);
        }
    };

    if log.rows.is_empty() {
        sink.notice("No data found in the log file.")?;
        return Ok(Outcome::NoData);
    }

    let short = log.short_rows();
    if short > 0 {
        warn!(file = name, short_rows = short, "rows shorter than the header");
    }

    let views = options.filters.run(&log);
    render_views(sink, &log, &views, options.show_main_table)?;
    info!(file = name, rows = log.rows.len(), "rendered views");
    Ok(Outcome::Rendered)
}

/// Drive a session until the source runs dry or the operator exits.
///
/// Returns the number of exports that were rendered.
pub fn run_session<L, S>(source: &mut L, sink: &mut S, options: &SessionOptions) -> Result<usize>
where
    L: LogSource,
    S: TableSink,
{
    let mut rendered = 0;

    while let Some(loaded) = source.next_log()? {
        let name = loaded.path.display().to_string();
        match process_text(sink, &name, &loaded.text, options)? {
            Outcome::Rendered => {
                rendered += 1;
                if !source.keep_going()? {
                    break;
                }
            }
            Outcome::NoData | Outcome::Malformed => {}
        }
    }

    sink.notice("Exiting.")?;
    info!("session finished after {}", count_of(rendered, "file"));
    if options.pause_on_exit {
        source.pause()?;
    }
    Ok(rendered)
}

/// Run the session on the process console.
///
/// # Arguments
///
/// * `filters` - View slugs to show; `None` or empty shows every view
/// * `no_pause` - Skip the final "Press Enter to exit." prompt
///
/// # Errors
///
/// Fails on an unknown filter slug or when the console cannot be read or
/// written. Bad paths and malformed exports are reported and re-prompted.
pub fn run(filters: Option<&[String]>, no_pause: bool) -> Result<()> {
    let options = SessionOptions {
        filters: FilterSet::from_slugs(filters.unwrap_or_default())?,
        show_main_table: true,
        pause_on_exit: !no_pause,
    };

    let stdin = io::stdin();
    let mut source = PromptSource::new(stdin.lock(), io::stdout());
    let mut sink = ConsoleSink::new(io::stdout());
    run_session(&mut source, &mut sink, &options)?;
    Ok(())
}
