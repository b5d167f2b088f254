//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values. Every flag is optional:
//! running the binary with no arguments refines `debug.txt` into
//! `debug-refined.txt`.

use clap::Parser;
use std::path::PathBuf;

/// covrefine - condense forge coverage debug reports
///
/// Reads the debug report produced by `forge coverage --report debug`
/// and re-emits every zero-hit element grouped by contract and kind,
/// so the untested parts are visible without scanning the raw dump.
///
/// Examples:
///   covrefine
///   covrefine --input coverage/debug.txt --output uncovered.txt
///   covrefine --format json
///   covrefine --strict
///   covrefine --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the raw coverage debug report
    ///
    /// Defaults to `debug.txt` in the current directory (or the path
    /// set in .covrefine.toml).
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file path for the refined summary
    ///
    /// Defaults to `debug-refined.txt` (or the path set in .covrefine.toml).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .covrefine.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail when a nonempty report yields no uncovered elements
    ///
    /// Zero extractions from a nonempty report usually mean the report
    /// format drifted, not that coverage is complete. Exit code 2.
    #[arg(long)]
    pub strict: bool,

    /// Dry run: parse the report and print statistics without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .covrefine.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the refined summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Condensed text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Refusing to clobber the raw report
        if let (Some(input), Some(output)) = (&self.input, &self.output) {
            if input == output {
                return Err("Input and output paths must differ".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: None,
            output: None,
            format: OutputFormat::Text,
            config: None,
            strict: false,
            dry_run: false,
            init_config: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_validation_defaults_ok() {
        let args = make_args();
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_same_input_and_output() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("debug.txt"));
        args.output = Some(PathBuf::from("debug.txt"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_skipped_for_init_config() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
