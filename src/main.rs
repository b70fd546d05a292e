//! drm-assess - Disaster risk management maturity assessment
//!
//! A CLI tool that scores a `Q#,Yes/No,Weight;...` submission against the
//! DRM pillar/thematic-area taxonomy and renders the result as a Markdown
//! or JSON report with chart series and pre-authored summaries.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Invalid submission or runtime error (config, IO, etc.)
//!   2 - Some area is below the minimum standard and --fail-below-minimum is set

mod analysis;
mod charts;
mod cli;
mod config;
mod models;
mod parser;
mod report;
mod summaries;
mod taxonomy;

use anyhow::{Context, Result};
use charts::ChartSeries;
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use models::{AreaSummary, Assessment, QuestionMap, Report, ReportMetadata};
use std::io::Read;
use std::path::{Path, PathBuf};
use summaries::SummaryStore;
use taxonomy::Taxonomy;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging so `general.verbose` applies
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    info!("drm-assess v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    source.log();

    match run_assessment(args, config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Assessment failed: {:#}", e);
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .drm-assess.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE);
    println!("   Edit it to customize the threshold, summaries directory, and report.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// `RUST_LOG` directives are honoured on top of `level`. Logs go to stderr
/// so stdout stays free for the report.
fn init_logging(level: tracing::Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run parse → aggregate → lookup → report. Returns exit code (0 or 2).
fn run_assessment(args: Args, config: Config) -> Result<i32> {
    config.validate()?;

    let raw = read_submission(&args)?;

    let taxonomy = Taxonomy::drm();
    let questions = match parser::parse_submission(&raw, &taxonomy) {
        Ok(questions) => questions,
        Err(e) => {
            debug!("Rejected entry {:?} (field {:?})", e.entry(), e.field());
            return Err(e).context("Invalid submission");
        }
    };
    info!("Parsed {} answered questions", questions.len());

    let assessment = analysis::aggregate(&questions, &taxonomy, config.assessment.minimum_standard);

    let store = if config.report.include_summaries {
        let dir = Path::new(&config.summaries.directory);
        SummaryStore::load(dir)
            .with_context(|| format!("Failed to load summaries from {}", dir.display()))?
    } else {
        SummaryStore::empty()
    };
    if config.report.include_summaries && store.is_empty() {
        warn!("No summary tables loaded, using fallback texts");
    } else {
        debug!("Summary tables for {} areas", store.len());
    }

    let summaries = build_summaries(
        &taxonomy,
        &questions,
        &assessment,
        &store,
        config.assessment.country.as_deref(),
    );

    let report = Report {
        metadata: ReportMetadata {
            country: config.assessment.country.clone(),
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            questions_answered: questions.len(),
            questions_total: taxonomy.question_count(),
        },
        charts: ChartSeries::from_assessment(&assessment),
        summaries,
        assessment,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report, &config.report),
    };

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path))?;
            if !args.quiet {
                print_summary(&report.assessment);
                eprintln!("\n✅ Assessment complete! Report saved to: {}", path);
            }
        }
        None => println!("{}", output.trim_end_matches('\n')),
    }

    if args.fail_below_minimum && report.assessment.has_below_minimum() {
        warn!(
            "{} areas below the minimum standard",
            report.assessment.below_minimum().len()
        );
        return Ok(2);
    }

    Ok(0)
}

/// Read the submission from --input, --input-file or stdin.
fn read_submission(args: &Args) -> Result<String> {
    if let Some(ref text) = args.input {
        return Ok(text.clone());
    }

    if let Some(ref path) = args.input_file {
        info!("Reading submission from: {}", path.display());
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    debug!("Reading submission from stdin");
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read submission from stdin")?;
    Ok(buffer)
}

/// Look up the summary text of every thematic area.
fn build_summaries(
    taxonomy: &Taxonomy,
    questions: &QuestionMap,
    assessment: &Assessment,
    store: &SummaryStore,
    country: Option<&str>,
) -> Vec<AreaSummary> {
    taxonomy
        .nodes()
        .iter()
        .zip(&assessment.thematic)
        .map(|(node, score)| {
            let indicator = analysis::answer_indicator(node, questions);
            let text = store.lookup(&node.thematic, &indicator, country);
            AreaSummary {
                thematic: node.thematic.clone(),
                indicator,
                text,
                below_minimum: score.below_minimum,
            }
        })
        .collect()
}

/// Print a short score summary to stderr.
fn print_summary(assessment: &Assessment) {
    eprintln!("\n📊 Assessment Summary:");
    for pillar in &assessment.pillars {
        eprintln!(
            "   {} {}: {:.0}%",
            pillar.band().emoji(),
            taxonomy::strip_numbering(&pillar.pillar),
            pillar.percent()
        );
    }
    let below = analysis::below_minimum_names(assessment);
    if !below.is_empty() {
        eprintln!("   ⚠️  Below minimum standard: {}", below.join(", "));
    }
}

/// Where the configuration came from, logged once logging is up.
enum ConfigSource {
    File(PathBuf),
    DefaultFile,
    Defaults,
    DefaultsAfterError(anyhow::Error),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config from: {}", path.display()),
            ConfigSource::DefaultFile => info!("Loaded default config from {}", config::CONFIG_FILE),
            ConfigSource::Defaults => debug!("No config file found, using defaults"),
            ConfigSource::DefaultsAfterError(e) => warn!("Failed to load config: {:#}", e),
        }
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::File(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigSource::Defaults)),
        Err(e) => Ok((Config::default(), ConfigSource::DefaultsAfterError(e))),
    }
}
