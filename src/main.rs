// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Gather input lines and clean them into unique domains
// 4. Run the batch and print the results
// 5. Exit with proper code (0 = all domains have pages, 1 = some don't, 2 = error)
// =============================================================================

mod batch;         // src/batch/ - worker pool, timeouts, result records
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - limits and timeouts
mod domain;        // src/domain/ - input cleaning and dedup
mod report;        // src/report.rs - table / JSON output
mod sitemap;       // src/sitemap/ - per-domain sitemap lookup

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, IsTerminal};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, InputArgs, TuningArgs};
use domain::Domain;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so stdout stays clean for the table or JSON
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("page_counter={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Analyse { input, json, tuning } => handle_analyse(&input, json, &tuning).await,
        Commands::Domains { input } => handle_domains(&input),
    }
}

// Handles the 'analyse' subcommand
async fn handle_analyse(input: &InputArgs, json: bool, tuning: &TuningArgs) -> Result<i32> {
    let domains = read_domains(input)?;
    if domains.is_empty() {
        eprintln!("Please enter valid URLs or domains");
        return Ok(1);
    }

    let settings = tuning.to_settings();
    let client = sitemap::build_client(&settings)?;

    eprintln!("🔍 Analysing {} unique domain(s)...", domains.len());

    let report = batch::run_batch(&client, &settings, &domains, |done, total| {
        eprint!("\r   Analysed {}/{} domains", done, total);
    })
    .await;
    eprintln!();

    eprintln!(
        "✅ Analysis complete! Processed {} domains in {:.1} seconds\n",
        report.results.len(),
        report.elapsed().as_secs_f64()
    );

    report::print_report(&report, json)?;

    if report.issues().is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Handles the 'domains' subcommand
fn handle_domains(input: &InputArgs) -> Result<i32> {
    let domains = read_domains(input)?;
    if domains.is_empty() {
        eprintln!("Please enter valid URLs or domains");
        return Ok(1);
    }

    for domain in &domains {
        println!("{}", domain);
    }
    eprintln!("Found {} unique domains to analyse", domains.len());
    Ok(0)
}

// Collects raw lines from arguments, --file, or stdin, then cleans them
fn read_domains(input: &InputArgs) -> Result<Vec<Domain>> {
    let mut lines = input.domains.clone();

    if let Some(path) = &input.file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        lines.extend(contents.lines().map(str::to_string));
    }

    if input.domains.is_empty() && input.file.is_none() {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            eprintln!("Paste URLs or domains, one per line (Ctrl-D to finish):");
        }
        for line in stdin.lock().lines() {
            lines.push(line.context("failed to read stdin")?);
        }
    }

    Ok(domain::unique_domains(&lines))
}
