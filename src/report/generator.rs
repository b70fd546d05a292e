//! Report generation.
//!
//! This module renders an assessment as a Markdown document or as JSON.

use crate::charts::ChartSeries;
use crate::config::ReportConfig;
use crate::models::{AreaSummary, Assessment, MaturityBand, Report, ReportMetadata};
use crate::taxonomy::strip_numbering;
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, options: &ReportConfig) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# DRM System Assessment\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_analysis_section(&report.assessment));
    output.push_str(&generate_pillar_section(&report.charts, options.bar_width));
    output.push_str(&generate_thematic_section(&report.assessment));

    if options.include_charts {
        output.push_str(&generate_rings_section(&report.charts));
    }

    if options.include_summaries {
        output.push_str(&generate_summaries_section(&report.summaries));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    if let Some(ref country) = metadata.country {
        section.push_str(&format!("- **Country:** {}\n", country));
    }
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Questions Answered:** {} of {}\n",
        metadata.questions_answered, metadata.questions_total
    ));
    section.push_str(&format!("- **Tool Version:** {}\n", metadata.tool_version));
    section.push('\n');

    section
}

/// Below-minimum analysis, or a congratulation when every area passes.
fn generate_analysis_section(assessment: &Assessment) -> String {
    let mut section = String::new();
    let below = crate::analysis::below_minimum_names(assessment);

    section.push_str("## Analysis\n\n");

    match below.len() {
        0 => {
            section.push_str(
                "✓ Congratulations! All assessed areas meet or exceed the minimum standard.\n\n",
            );
            return section;
        }
        1 => section.push_str(&format!(
            "⚠️ **Areas Below Minimum Standard:** the following area does not meet the minimum standard ({:.2}):\n\n",
            assessment.minimum_standard
        )),
        n => section.push_str(&format!(
            "⚠️ **The following {} areas do not meet the minimum standard ({:.2}):**\n\n",
            n, assessment.minimum_standard
        )),
    }

    for area in below {
        section.push_str(&format!("- {}\n", area));
    }
    section.push('\n');

    section
}

/// Pillar achievement table with text progress bars.
fn generate_pillar_section(charts: &ChartSeries, bar_width: usize) -> String {
    let mut section = String::new();

    section.push_str("## Results by Pillar\n\n");
    section.push_str("| Pillar | Achievement | | Band |\n");
    section.push_str("|:---|:---:|:---|:---|\n");

    for bar in &charts.pillars {
        section.push_str(&format!(
            "| {} | {} | `{}` | {} {} |\n",
            bar.label,
            bar.text,
            progress_bar(bar.score, bar_width),
            bar.band.emoji(),
            bar.band
        ));
    }
    section.push('\n');

    section
}

/// Thematic area score table.
fn generate_thematic_section(assessment: &Assessment) -> String {
    let mut section = String::new();

    section.push_str("## Results by Thematic Area\n\n");
    section.push_str("| Pillar | Thematic Area | Score | Band |\n");
    section.push_str("|:---|:---|:---:|:---|\n");

    for t in &assessment.thematic {
        let name = strip_numbering(&t.thematic);
        let name = if t.below_minimum {
            format!("**{}** ⚠️", name)
        } else {
            name.to_string()
        };
        section.push_str(&format!(
            "| {} | {} | {:.2} | {} |\n",
            strip_numbering(&t.pillar),
            name,
            t.score,
            MaturityBand::from_score(t.score)
        ));
    }
    section.push('\n');

    section
}

fn generate_rings_section(charts: &ChartSeries) -> String {
    let mut section = String::new();

    section.push_str("### Maturity Scale\n\n");
    for ring in &charts.rings {
        section.push_str(&format!("- **{}**: {:.2}\n", ring.label, ring.value));
    }
    section.push('\n');

    section
}

/// Per-area pre-authored summaries.
fn generate_summaries_section(summaries: &[AreaSummary]) -> String {
    if summaries.is_empty() {
        return String::new();
    }

    let mut section = String::new();
    section.push_str("## Thematic Area Summaries\n\n");

    for summary in summaries {
        let name = strip_numbering(&summary.thematic);
        if summary.below_minimum {
            section.push_str(&format!("### ⚠️ {}\n\n", name));
        } else {
            section.push_str(&format!("### {}\n\n", name));
        }
        section.push_str(&format!("*Answer pattern: `{}`*\n\n", summary.indicator));
        section.push_str(&summary.text);
        section.push_str("\n\n");
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by drm-assess*\n".to_string()
}

/// `score` in [0, 1] as a fixed-width bar of `█` and `░`.
fn progress_bar(score: f64, width: usize) -> String {
    let filled = ((score.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
