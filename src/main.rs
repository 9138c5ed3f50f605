use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fwlog_inspector::{commands, utils};

#[derive(Parser)]
#[command(name = "fwlog")]
#[command(about = "Firewall log export inspector", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for log files and show every view (default)
    Interactive {
        /// Views to show (comma-separated slugs, see list-filters)
        #[arg(long, value_delimiter = ',')]
        filter: Option<Vec<String>>,

        /// Exit without waiting for a final keypress
        #[arg(long)]
        no_pause: bool,
    },

    /// Show views for log files given on the command line
    Analyze {
        /// Path to log file(s) - .log, .log.gz or .log.zst
        #[arg(required = true)]
        log_files: Vec<String>,

        /// Views to show (comma-separated slugs, see list-filters)
        #[arg(long, value_delimiter = ',')]
        filter: Option<Vec<String>>,

        /// Do not print the unfiltered main table
        #[arg(long)]
        no_main_table: bool,

        /// Export views to this file
        #[arg(long)]
        export: Option<String>,

        /// Export format: csv or json (auto-detected from file extension if not specified)
        #[arg(long, value_parser = ["csv", "json"])]
        format: Option<String>,
    },

    /// List the available views
    ListFilters,

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    match cli.command {
        None => commands::interactive::run(None, false),
        Some(Commands::Interactive { filter, no_pause }) => {
            commands::interactive::run(filter.as_deref(), no_pause)
        }
        Some(Commands::Analyze {
            log_files,
            filter,
            no_main_table,
            export,
            format,
        }) => commands::analyze::run(
            &log_files,
            filter.as_deref(),
            !no_main_table,
            export.as_deref(),
            format.as_deref(),
        ),
        Some(Commands::ListFilters) => commands::list_filters::run(),
        Some(Commands::GenerateCompletion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "fwlog", &mut std::io::stdout());
            Ok(())
        }
    }
}
