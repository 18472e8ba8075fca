//! filtergen: Generate Python filter classes from JSON filter definitions
//!
//! Usage:
//!   # Generate into the current directory
//!   filtergen -S users.json
//!
//!   # Several sources, comma and/or whitespace separated
//!   filtergen -S "users.json, posts.json" -D ./filters
//!
//!   # Append local_source/local_source.json to the first filter's fields
//!   filtergen -S users.json -L

use anyhow::Result;
use clap::Parser;
use filtergen::{generate_filters, GeneratorConfig, Reporter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "filtergen")]
#[command(about = "Generate Python filter classes from JSON filter definitions", long_about = None)]
struct Args {
    /// Source files to make filters from (`.json`, comma or space separated)
    #[arg(short = 'S', long = "source", value_name = "SOURCES")]
    source: String,

    /// Destination directory to save generated filters (default: current directory)
    #[arg(short = 'D', long = "destination", value_name = "DIR")]
    destination: Option<PathBuf>,

    /// Add the local filter fields from local_source/local_source.json
    #[arg(short = 'L', long = "add_local")]
    add_local: bool,

    /// Python module the generated filters import their models from
    #[arg(long, value_name = "MODULE", default_value = "db.schema")]
    schema_location: String,

    /// Increase diagnostic output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut reporter = Reporter::stdout();

    let destination = match args.destination {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let destination_dir = if destination.is_dir() {
        Some(destination)
    } else {
        let shown = std::env::current_dir()
            .map(|cwd| cwd.join(&destination))
            .unwrap_or(destination);
        reporter.warning(format!(
            "Destination directory `{}` does not exists.",
            shown.display()
        ));
        None
    };

    let config = GeneratorConfig {
        db_schema_location: args.schema_location,
        load_local: args.add_local,
        destination_dir,
        ..GeneratorConfig::default()
    };
    tracing::debug!(?config, "starting generation");

    let summary = generate_filters(&args.source, &config, &mut reporter)?;
    tracing::info!(
        written = summary.stats.written,
        render_failures = summary.stats.render_failures,
        write_failures = summary.stats.write_failures,
        missing_sources = summary.missing_sources,
        failed_sources = summary.failed_sources,
        "generation finished"
    );

    if !summary.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Diagnostics go to stderr; stdout carries only the status protocol
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
