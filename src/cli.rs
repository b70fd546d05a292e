//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// drm-assess - Disaster risk management maturity assessment
///
/// Scores a `Q#,Yes/No,Weight;...` submission across the six DRM pillars
/// and twelve thematic areas, and writes a Markdown or JSON report.
///
/// Examples:
///   drm-assess --input "Q1,Yes,1;Q2,No,0.5"
///   drm-assess --input-file answers.txt --country Kenya --format json
///   cat answers.txt | drm-assess --output report.md
///   drm-assess --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Submission text, e.g. "Q1,Yes,1;Q2,No,0.5"
    ///
    /// When neither --input nor --input-file is given, the submission
    /// is read from stdin.
    #[arg(short, long, value_name = "TEXT", conflicts_with = "input_file")]
    pub input: Option<String>,

    /// Read the submission from a file
    #[arg(short = 'f', long, value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Country name substituted into summary texts
    #[arg(long, value_name = "NAME", env = "DRM_ASSESS_COUNTRY")]
    pub country: Option<String>,

    /// Directory of summary pattern tables
    ///
    /// Defaults to the config value or "LLM".
    #[arg(short, long, value_name = "DIR")]
    pub summaries: Option<PathBuf>,

    /// Minimum standard threshold (0.0 - 1.0)
    ///
    /// Thematic areas scoring strictly below this are flagged.
    #[arg(short, long, value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Output file path for the report (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Path to configuration file
    ///
    /// If not specified, looks for .drm-assess.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Leave per-area summary texts out of the report
    #[arg(long)]
    pub no_summaries: bool,

    /// Exit with code 2 when any thematic area is below the minimum standard
    #[arg(long)]
    pub fail_below_minimum: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .drm-assess.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
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

        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err("Threshold must be between 0.0 and 1.0".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref path) = self.input_file {
            if !path.is_file() {
                return Err(format!("Input file does not exist: {}", path.display()));
            }
        }

        if let Some(ref dir) = self.summaries {
            if dir.exists() && !dir.is_dir() {
                return Err(format!(
                    "Summaries path is not a directory: {}",
                    dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the config file's `general.verbose`; `--quiet`
    /// wins over it.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: Some("Q1,Yes,1".to_string()),
            input_file: None,
            country: None,
            summaries: None,
            threshold: None,
            output: None,
            format: OutputFormat::Markdown,
            config: None,
            no_summaries: false,
            fail_below_minimum: false,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_validation_ok() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_threshold_range() {
        let mut args = make_args();
        args.threshold = Some(1.5);
        assert!(args.validate().is_err());

        args.threshold = Some(0.0);
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
    fn test_validation_missing_input_file() {
        let mut args = make_args();
        args.input = None;
        args.input_file = Some(PathBuf::from("/definitely/not/here.txt"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::WARN);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
    }

    #[test]
    fn test_log_level_from_config_verbose() {
        let mut args = make_args();
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.quiet = true;
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }

    #[test]
    fn test_parse_from_argv() {
        let args = Args::try_parse_from([
            "drm-assess",
            "--input",
            "Q1,Yes,1",
            "--format",
            "json",
            "--threshold",
            "0.3",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.threshold, Some(0.3));
    }
}
