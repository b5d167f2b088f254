//! covrefine - Uncovered-Elements Summarizer for Forge Coverage
//!
//! A CLI tool that reads the debug report written by
//! `forge coverage --report debug > debug.txt` and condenses it into
//! a summary of every element (function, branch, line) with zero hits,
//! grouped by contract and kind.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input, unwritable output, bad config)
//!   2 - Strict mode: nonempty report yielded no uncovered elements

mod analysis;
mod cli;
mod config;
mod extractor;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use models::Summary;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        match handle_init_config() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("\n❌ Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Initialize logging
    init_logging(&args);

    info!("covrefine v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the refine pipeline
    match run_refine(args) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Refine failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .covrefine.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".covrefine.toml");

    if path.exists() {
        eprintln!("⚠️  .covrefine.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .covrefine.toml")?;

    println!("✅ Created .covrefine.toml with default settings.");
    println!("   Edit it to customize input/output paths and strict mode.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete refine workflow. Returns exit code (0 or 2).
fn run_refine(args: Args) -> Result<i32> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input = PathBuf::from(&config.general.input);
    let output = PathBuf::from(&config.general.output);

    if input == output {
        anyhow::bail!("Input and output paths must differ: {}", input.display());
    }

    // Step 1: Read the raw report
    println!("📄 Reading coverage report: {}", input.display());
    let report_text = extractor::read_report(&input)?;
    debug!("Read {} bytes", report_text.len());

    // Step 2: Extract zero-hit elements
    let summary = extractor::extract(&report_text);
    info!(
        "Extracted {} elements across {} sections",
        summary.total_elements(),
        summary.units().len()
    );

    // Zero extractions from a nonempty report usually mean the report
    // format drifted, not that every element is covered.
    let drifted = summary.total_elements() == 0 && !report_text.trim().is_empty();
    if drifted {
        warn!("Nonempty report yielded no uncovered elements; the report format may have changed");
        println!("⚠️  No uncovered elements matched. If coverage is not actually complete,");
        println!("   the report format may have drifted from the expected convention.");
    }

    // Handle --dry-run: print statistics and exit without writing
    if args.dry_run {
        println!("\n🔍 Dry run: no output written.");
        print_summary_stats(&summary);
        return Ok(0);
    }

    // Step 3: Render and write the refined summary
    let content = match args.format {
        OutputFormat::Text => report::generate_text_report(&summary),
        OutputFormat::Json => report::generate_json_report(&summary)?,
    };
    report::save_report(&content, &output)?;

    print_summary_stats(&summary);
    println!("\n✅ Summary has been written to: {}", output.display());

    // Check strict mode threshold
    if drifted && config.report.strict {
        eprintln!("\n⛔ Strict mode: no uncovered elements extracted. Failing (exit code 2).");
        return Ok(2);
    }

    Ok(0)
}

/// Print aggregate statistics for an extracted summary.
fn print_summary_stats(summary: &Summary) {
    println!("\n📊 Coverage Summary:");
    println!(
        "   Contracts with uncovered elements: {}",
        analysis::units_with_elements(summary)
    );
    println!("   Total uncovered elements: {}", summary.total_elements());

    let dist = analysis::kind_distribution(summary);
    if !dist.is_empty() {
        let breakdown: Vec<String> = dist
            .iter()
            .map(|(kind, count)| format!("{}: {}", kind, count))
            .collect();
        println!("   By kind: {}", breakdown.join(" | "));
    }

    let top = analysis::most_uncovered_units(summary, 5);
    if !top.is_empty() {
        println!("   Most uncovered:");
        for (unit, count) in top {
            println!("     📄 {} ({} elements)", unit, count);
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .covrefine.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
