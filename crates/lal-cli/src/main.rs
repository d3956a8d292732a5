//! lal - check, format, list and search LAL credential lists

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command-line tool for LAL credential lists
#[derive(Parser, Debug)]
#[command(name = "lal")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the LAL file (overrides config)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse the file and report what was found
    Check {
        /// Fail if any line could not be parsed
        #[arg(long)]
        strict: bool,
    },
    /// Rewrite the file in canonical form
    Fmt {
        /// Only report whether the file would change
        #[arg(long)]
        check: bool,
        /// Rewrite even if lines that do not parse would be dropped
        #[arg(long)]
        force: bool,
    },
    /// List all entries
    List {
        /// Print passwords instead of masking them
        #[arg(long)]
        show_passwords: bool,
    },
    /// Fuzzy search entries by login, display name and email
    Search {
        query: String,
        /// Maximum number of results (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print passwords instead of masking them
        #[arg(long)]
        show_passwords: bool,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Also covers the lal_core target.
    let directive = if args.verbose { "lal=debug" } else { "lal=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = config::Config::load(args.config)?;
    let path = args.file.unwrap_or(config.default_file);
    tracing::debug!("Using LAL file: {}", path.display());

    let (output, ok) = match args.command {
        Command::Check { strict } => commands::check(&path, strict)?,
        Command::Fmt { check, force } => commands::fmt(&path, check, force)?,
        Command::List { show_passwords } => {
            (commands::list(&path, config.mask_passwords && !show_passwords)?, true)
        }
        Command::Search {
            query,
            limit,
            show_passwords,
        } => {
            let limit = limit.unwrap_or(config.search_limit);
            let mask = config.mask_passwords && !show_passwords;
            (commands::search(&path, &query, limit, mask)?, true)
        }
    };

    print!("{output}");
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
