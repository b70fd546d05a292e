//! Data models for the assessment scorer.
//!
//! This module contains the core data structures shared by the parser,
//! the aggregator and the report generator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Answer given to a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Parse `yes`/`no`, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "yes" => Some(Answer::Yes),
            "no" => Some(Answer::No),
            _ => None,
        }
    }

    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Yes => write!(f, "Yes"),
            Answer::No => write!(f, "No"),
        }
    }
}

/// A validated `Q#,Yes/No,Weight` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionEntry {
    /// Question identifier, e.g. `Q7`.
    pub id: String,
    pub answer: Answer,
    /// Maximum contribution of this question, in [0, 1].
    pub weight: f64,
}

impl QuestionEntry {
    /// Contribution to the thematic area: the weight when answered yes.
    pub fn score(&self) -> f64 {
        if self.answer.is_yes() {
            self.weight
        } else {
            0.0
        }
    }
}

/// Validated submission, keyed by question identifier.
pub type QuestionMap = BTreeMap<String, QuestionEntry>;

/// Maturity band implied by the chart's reference rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaturityBand {
    /// Below 0.25
    Nascent,
    /// 0.25 up to 0.50
    Emerging,
    /// 0.50 up to 0.75
    Established,
    /// 0.75 and above
    Mature,
}

impl MaturityBand {
    /// Ring radii on the normalized scale, paired with their band.
    pub const RINGS: [(f64, MaturityBand); 4] = [
        (0.25, MaturityBand::Nascent),
        (0.50, MaturityBand::Emerging),
        (0.75, MaturityBand::Established),
        (1.00, MaturityBand::Mature),
    ];

    /// Band for a normalized score.
    pub fn from_score(score: f64) -> Self {
        if score < 0.25 {
            MaturityBand::Nascent
        } else if score < 0.50 {
            MaturityBand::Emerging
        } else if score < 0.75 {
            MaturityBand::Established
        } else {
            MaturityBand::Mature
        }
    }

    /// Hex color used for bars in this band.
    pub fn color(&self) -> &'static str {
        match self {
            MaturityBand::Nascent => "#dc3545",
            MaturityBand::Emerging => "#fd7e14",
            MaturityBand::Established => "#ffc107",
            MaturityBand::Mature => "#0d6efd",
        }
    }

    /// Returns an emoji representation of the band.
    pub fn emoji(&self) -> &'static str {
        match self {
            MaturityBand::Nascent => "🔴",
            MaturityBand::Emerging => "🟠",
            MaturityBand::Established => "🟡",
            MaturityBand::Mature => "🔵",
        }
    }
}

impl fmt::Display for MaturityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaturityBand::Nascent => write!(f, "Nascent"),
            MaturityBand::Emerging => write!(f, "Emerging"),
            MaturityBand::Established => write!(f, "Established"),
            MaturityBand::Mature => write!(f, "Mature"),
        }
    }
}

/// Score of one thematic area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThematicScore {
    pub pillar: String,
    pub thematic: String,
    /// Normalized score in [0, 1].
    pub score: f64,
    /// Sum of yes-weights.
    pub raw_score: f64,
    /// Sum of weights of the questions answered.
    pub attainable: f64,
    pub below_minimum: bool,
}

/// Score of one pillar: the mean of its thematic scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub pillar: String,
    pub score: f64,
}

impl PillarScore {
    pub fn band(&self) -> MaturityBand {
        MaturityBand::from_score(self.score)
    }

    /// Score as a percentage in [0, 100].
    pub fn percent(&self) -> f64 {
        self.score * 100.0
    }
}

/// Aggregated result of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Thematic scores in taxonomy order.
    pub thematic: Vec<ThematicScore>,
    /// Pillar scores in taxonomy order.
    pub pillars: Vec<PillarScore>,
    /// Threshold used for the below-minimum flag.
    pub minimum_standard: f64,
}

impl Assessment {
    /// Thematic areas flagged below the minimum standard.
    pub fn below_minimum(&self) -> Vec<&ThematicScore> {
        self.thematic.iter().filter(|t| t.below_minimum).collect()
    }

    /// Whether any area is below the minimum standard.
    pub fn has_below_minimum(&self) -> bool {
        self.thematic.iter().any(|t| t.below_minimum)
    }
}

/// Per-area summary text and the pattern it was looked up with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSummary {
    pub thematic: String,
    /// Ordered `1`/`0` answer pattern.
    pub indicator: String,
    pub text: String,
    pub below_minimum: bool,
}

/// Metadata about the assessment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Assessed country, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the tool that produced the report.
    pub tool_version: String,
    /// Number of questions present in the submission.
    pub questions_answered: usize,
    /// Number of questions in the taxonomy.
    pub questions_total: usize,
}

/// The complete assessment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub assessment: Assessment,
    pub charts: crate::charts::ChartSeries,
    pub summaries: Vec<AreaSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_parse() {
        assert_eq!(Answer::parse("Yes"), Some(Answer::Yes));
        assert_eq!(Answer::parse("YES"), Some(Answer::Yes));
        assert_eq!(Answer::parse("no"), Some(Answer::No));
        assert_eq!(Answer::parse("Maybe"), None);
        assert_eq!(Answer::parse(""), None);
    }

    #[test]
    fn test_answer_display() {
        assert_eq!(Answer::Yes.to_string(), "Yes");
        assert_eq!(Answer::parse("no").map(|a| a.to_string()).as_deref(), Some("No"));
    }

    #[test]
    fn test_entry_score() {
        let entry = QuestionEntry {
            id: "Q1".to_string(),
            answer: Answer::Yes,
            weight: 0.75,
        };
        assert_eq!(entry.score(), 0.75);

        let no = QuestionEntry {
            answer: Answer::No,
            ..entry.clone()
        };
        assert_eq!(no.score(), 0.0);
    }

    #[test]
    fn test_maturity_band_boundaries() {
        assert_eq!(MaturityBand::from_score(0.0), MaturityBand::Nascent);
        assert_eq!(MaturityBand::from_score(0.2499), MaturityBand::Nascent);
        assert_eq!(MaturityBand::from_score(0.25), MaturityBand::Emerging);
        assert_eq!(MaturityBand::from_score(0.5), MaturityBand::Established);
        assert_eq!(MaturityBand::from_score(0.75), MaturityBand::Mature);
        assert_eq!(MaturityBand::from_score(1.0), MaturityBand::Mature);
    }

    #[test]
    fn test_band_ordering() {
        assert!(MaturityBand::Nascent < MaturityBand::Emerging);
        assert!(MaturityBand::Established < MaturityBand::Mature);
    }

    #[test]
    fn test_pillar_percent() {
        let pillar = PillarScore {
            pillar: "Preparedness".to_string(),
            score: 0.5,
        };
        assert_eq!(pillar.percent(), 50.0);
        assert_eq!(pillar.band(), MaturityBand::Established);
    }
}
