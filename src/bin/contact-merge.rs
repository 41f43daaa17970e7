//! Contact Merge CLI — group contacts that share a phone or email.
//!
//! Usage:
//!   contact-merge merge <INPUT|-> [--config path] [--format text|json]
//!   contact-merge stats <INPUT|-> [--config path]

use clap::{Parser, Subcommand};
use contact_merge::{merge, report, MergeConfig, MergeError, MergeResult, MergeSummary, OutputFormat};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "contact-merge",
    version,
    about = "Group contacts that share a phone number or email address"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge contacts and print the groups
    Merge {
        /// JSON file holding an array of contact objects ("-" for stdin)
        input: PathBuf,
        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format (overrides the config file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print counts for a merge without the groups
    Stats {
        /// JSON file holding an array of contact objects ("-" for stdin)
        input: PathBuf,
        /// YAML config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(path: Option<&Path>) -> MergeResult<MergeConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            MergeConfig::from_yaml_file(path)
        }
        None => Ok(MergeConfig::default()),
    }
}

/// Read a JSON array of records from a file, or stdin for "-"
fn read_records(input: &Path) -> MergeResult<Vec<Value>> {
    let text = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn run_merge(input: &Path, config: &MergeConfig) -> MergeResult<String> {
    let records = read_records(input)?;
    let mapped = config.fields.map(&records);
    let outcome = merge(&mapped)?;
    info!(
        records = records.len(),
        groups = outcome.groups.len(),
        "merged contacts"
    );

    // Render the caller's records, not the field-mapped views
    let groups: Vec<_> = outcome
        .groups
        .iter()
        .map(|g| contact_merge::ContactGroup {
            key: g.key,
            records: g.iter().map(|m| m.value()).collect(),
        })
        .collect();
    report::render(&groups, config.format)
}

fn run_stats(input: &Path, config: &MergeConfig) -> MergeResult<MergeSummary> {
    let records = read_records(input)?;
    let mapped = config.fields.map(&records);
    Ok(MergeSummary::from_outcome(&merge(&mapped)?))
}

fn cmd_merge(input: &Path, config: Option<&Path>, format: Option<OutputFormat>) -> i32 {
    let result = load_config(config).and_then(|mut config| {
        if let Some(format) = format {
            config.format = format;
        }
        run_merge(input, &config)
    });
    report_result(result)
}

fn cmd_stats(input: &Path, config: Option<&Path>) -> i32 {
    let result = load_config(config)
        .and_then(|config| run_stats(input, &config))
        .map(|summary| format!("{}\n", summary));
    report_result(result)
}

fn report_result(result: Result<String, MergeError>) -> i32 {
    match result {
        Ok(out) => {
            print!("{}", out);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match cli.command {
        Commands::Merge {
            input,
            config,
            format,
        } => cmd_merge(&input, config.as_deref(), format),
        Commands::Stats { input, config } => cmd_stats(&input, config.as_deref()),
    };
    std::process::exit(code);
}
