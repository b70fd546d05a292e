//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.drm-assess.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".drm-assess.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Scoring settings.
    #[serde(default)]
    pub assessment: AssessmentConfig,

    /// Summary text settings.
    #[serde(default)]
    pub summaries: SummariesConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path. Reports go to stdout when unset.
    #[serde(default)]
    pub output: Option<String>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Areas scoring strictly below this are flagged.
    #[serde(default = "default_minimum_standard")]
    pub minimum_standard: f64,

    /// Country name substituted into summary texts.
    #[serde(default)]
    pub country: Option<String>,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            minimum_standard: default_minimum_standard(),
            country: None,
        }
    }
}

fn default_minimum_standard() -> f64 {
    crate::analysis::DEFAULT_MINIMUM_STANDARD
}

/// Summary text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummariesConfig {
    /// Directory holding `<thematic area>.json` pattern tables.
    #[serde(default = "default_summaries_dir")]
    pub directory: String,
}

impl Default for SummariesConfig {
    fn default() -> Self {
        Self {
            directory: default_summaries_dir(),
        }
    }
}

fn default_summaries_dir() -> String {
    "LLM".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include per-area summary texts.
    #[serde(default = "default_true")]
    pub include_summaries: bool,

    /// Include the chart series tables.
    #[serde(default = "default_true")]
    pub include_charts: bool,

    /// Width in characters of the text bars in Markdown output.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_summaries: true,
            include_charts: true,
            bar_width: default_bar_width(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_bar_width() -> usize {
    20
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.assessment.minimum_standard;
        if !(0.0..=1.0).contains(&threshold) {
            bail!(
                "assessment.minimum_standard must be between 0 and 1, got {}",
                threshold
            );
        }
        if self.report.bar_width == 0 {
            bail!("report.bar_width must be at least 1");
        }
        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(threshold) = args.threshold {
            self.assessment.minimum_standard = threshold;
        }
        if let Some(ref country) = args.country {
            self.assessment.country = Some(country.clone());
        }
        if let Some(ref dir) = args.summaries {
            self.summaries.directory = dir.display().to_string();
        }
        if let Some(ref output) = args.output {
            self.general.output = Some(output.display().to_string());
        }
        if args.no_summaries {
            self.report.include_summaries = false;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.assessment.minimum_standard, 0.25);
        assert_eq!(config.summaries.directory, "LLM");
        assert!(config.report.include_summaries);
        assert!(config.general.output.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "assessment.md"
verbose = true

[assessment]
minimum_standard = 0.3
country = "Peru"

[summaries]
directory = "texts"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output.as_deref(), Some("assessment.md"));
        assert!(config.general.verbose);
        assert_eq!(config.assessment.minimum_standard, 0.3);
        assert_eq!(config.assessment.country.as_deref(), Some("Peru"));
        assert_eq!(config.summaries.directory, "texts");
        assert_eq!(config.report.bar_width, 20);
    }

    #[test]
    fn test_load_rejects_bad_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[assessment]\nminimum_standard = 1.5").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("minimum_standard"));
    }

    #[test]
    fn test_merge_with_args() {
        use clap::Parser;

        let mut config: Config = toml::from_str(
            "[assessment]\nminimum_standard = 0.3\ncountry = \"Peru\"\n",
        )
        .unwrap();

        let args = crate::cli::Args::try_parse_from([
            "drm-assess",
            "--input",
            "Q1,Yes,1",
            "--threshold",
            "0.4",
        ])
        .unwrap();
        config.merge_with_args(&args);
        assert_eq!(config.assessment.minimum_standard, 0.4);
        assert_eq!(config.assessment.country.as_deref(), Some("Peru"));
        assert_eq!(config.summaries.directory, "LLM");
        assert!(config.report.include_summaries);
        assert!(!config.general.verbose);

        let args = crate::cli::Args::try_parse_from([
            "drm-assess",
            "--input",
            "Q1,Yes,1",
            "--country",
            "Kenya",
            "--summaries",
            "texts",
            "--output",
            "out.md",
            "--no-summaries",
            "--verbose",
        ])
        .unwrap();
        config.merge_with_args(&args);
        assert_eq!(config.assessment.minimum_standard, 0.4);
        assert_eq!(config.assessment.country.as_deref(), Some("Kenya"));
        assert_eq!(config.summaries.directory, "texts");
        assert_eq!(config.general.output.as_deref(), Some("out.md"));
        assert!(!config.report.include_summaries);
        assert!(config.general.verbose);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[assessment]"));
        assert!(toml_str.contains("[summaries]"));
        assert!(toml_str.contains("[report]"));

        let reparsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(reparsed.assessment.minimum_standard, 0.25);
    }
}
