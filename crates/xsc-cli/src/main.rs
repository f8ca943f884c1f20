//! XSC merge CLI
//!
//! Command-line tool for merging the active business units of the XSC
//! configuration files with the carrier export table.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};
use xsc_core::{extract_active_units, read_report, run, search_rows, RunConfig};

#[derive(Parser)]
#[command(name = "xsc-cli")]
#[command(about = "Merge XSC business units with the carrier export table", long_about = None)]
#[command(version)]
struct Cli {
    /// Defaults to `run` with the default paths
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, merge and write the report
    Run {
        /// Directory holding DM01.xscsys .. DM05.xscsys
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Carrier export table (CSV)
        #[arg(short, long)]
        lookup: Option<PathBuf>,

        /// Report file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON run configuration; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a JSON summary of the run
        #[arg(long)]
        summary: bool,
    },

    /// List the active units of a single .xscsys file
    Extract {
        /// Path to .xscsys file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Search a generated report
    Search {
        /// Report to search
        #[arg(short, long, default_value = "data.csv")]
        report: PathBuf,

        /// Maximum number of results to display
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Text to look for in any column
        query: String,
    },

    /// Create a run configuration template
    CreateConfig {
        /// Output path for the configuration file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_cli() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_cli() -> xsc_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => cmd_run(RunConfig::default(), false),
        Some(Commands::Run {
            dir,
            lookup,
            output,
            config,
            summary,
        }) => {
            let mut run_config = match config {
                Some(path) => RunConfig::load(path)?,
                None => RunConfig::default(),
            };
            if let Some(dir) = dir {
                run_config.input_dir = dir;
            }
            if let Some(lookup) = lookup {
                run_config.lookup_table = lookup;
            }
            if let Some(output) = output {
                run_config.output = output;
            }
            cmd_run(run_config, summary)
        }
        Some(Commands::Extract { file }) => cmd_extract(&file),
        Some(Commands::Search {
            report,
            limit,
            query,
        }) => cmd_search(&report, limit, &query),
        Some(Commands::CreateConfig { output }) => cmd_create_config(&output),
    }
}

fn cmd_run(config: RunConfig, summary: bool) -> xsc_core::Result<()> {
    debug!("run configuration: {:?}", config);
    let report = run(&config)?;

    if summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn cmd_extract(file: &PathBuf) -> xsc_core::Result<()> {
    let units = extract_active_units(file);

    println!("File: {}", file.display());
    println!("Active units: {}", units.len());
    println!();
    for unit in &units {
        println!("  {}", unit);
    }

    Ok(())
}

fn cmd_search(report: &PathBuf, limit: usize, query: &str) -> xsc_core::Result<()> {
    let rows = read_report(report)?;
    let hits = search_rows(&rows, query);

    if hits.is_empty() {
        println!("No results found");
        return Ok(());
    }

    for row in hits.iter().take(limit) {
        println!("{}", row.display_line());
    }

    if hits.len() > limit {
        println!("... ({} more results)", hits.len() - limit);
    }

    Ok(())
}

fn cmd_create_config(output: &PathBuf) -> xsc_core::Result<()> {
    RunConfig::default().save(output)?;
    println!("Created run configuration: {}", output.display());
    println!();
    println!("Edit the file to set your paths, then run:");
    println!("  xsc-cli run --config {}", output.display());

    Ok(())
}
