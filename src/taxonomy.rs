//! Static question taxonomy.
//!
//! Questions are grouped into thematic areas, and thematic areas into
//! pillars. The table is built once at startup and only ever borrowed.

use std::collections::HashMap;
use thiserror::Error;

/// Question ranges for each thematic area, in display order.
const DRM_AREAS: &[(&str, &str, &str)] = &[
    (
        "1. Legal and Institutional DRM Framework",
        "1.1. DRM policies and institutions",
        "Q1-Q4",
    ),
    (
        "1. Legal and Institutional DRM Framework",
        "1.2. Mainstreaming DRM into national and sectoral development plans",
        "Q5-Q6",
    ),
    ("2. Risk Identification", "Risk identification", "Q7-Q10"),
    (
        "3. Risk Reduction",
        "3.1. Territorial and urban planning",
        "Q11-Q14",
    ),
    (
        "3. Risk Reduction",
        "3.2. Public investment at the central level",
        "Q15-Q17",
    ),
    (
        "3. Risk Reduction",
        "3.3. Sector-specific risk reduction measures",
        "Q18-Q27",
    ),
    ("4. Preparedness", "4.1. Early warning systems", "Q28-Q30"),
    (
        "4. Preparedness",
        "4.2. Emergency preparedness and response",
        "Q31-Q34",
    ),
    ("4. Preparedness", "4.3. Adaptive social protection", "Q35-Q37"),
    ("5. Financial Protection", "5.1. Fiscal risk management", "Q38-Q41"),
    (
        "5. Financial Protection",
        "5.2. DRF strategies and instruments",
        "Q42-Q44",
    ),
    (
        "6. Resilient Reconstruction",
        "Resilient reconstruction",
        "Q45-Q47",
    ),
];

/// Errors raised while building a taxonomy table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TaxonomyError {
    /// A range string is not of the form `Qa-Qb` with `a <= b`.
    #[error("Invalid question range: {0}")]
    InvalidRange(String),

    /// The same question is assigned to two thematic areas.
    #[error("Question {question} is assigned to both '{first}' and '{second}'")]
    DuplicateQuestion {
        question: String,
        first: String,
        second: String,
    },
}

/// One thematic area and the questions that feed it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyNode {
    pub pillar: String,
    pub thematic: String,
    /// Question identifiers in scoring order.
    pub questions: Vec<String>,
}

/// Immutable question → thematic area → pillar mapping.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    nodes: Vec<TaxonomyNode>,
    index: HashMap<String, usize>,
}

impl Taxonomy {
    /// Build a taxonomy from `(pillar, thematic, "Qa-Qb")` rows.
    pub fn from_ranges<'a, I>(rows: I) -> Result<Self, TaxonomyError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let mut nodes = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for (pillar, thematic, range) in rows {
            let questions = parse_question_range(range)?;
            let position = nodes.len();

            for question in &questions {
                if let Some(&existing) = index.get(question) {
                    let first: &TaxonomyNode = &nodes[existing];
                    return Err(TaxonomyError::DuplicateQuestion {
                        question: question.clone(),
                        first: first.thematic.clone(),
                        second: thematic.to_string(),
                    });
                }
                index.insert(question.clone(), position);
            }

            nodes.push(TaxonomyNode {
                pillar: pillar.to_string(),
                thematic: thematic.to_string(),
                questions,
            });
        }

        Ok(Self { nodes, index })
    }

    /// The fixed DRM assessment taxonomy (6 pillars, 12 areas, 47 questions).
    pub fn drm() -> Self {
        // The built-in table is constant and covered by tests.
        Self::from_ranges(DRM_AREAS.iter().copied())
            .unwrap_or_else(|e| unreachable!("built-in taxonomy is malformed: {e}"))
    }

    /// All thematic areas in display order.
    pub fn nodes(&self) -> &[TaxonomyNode] {
        &self.nodes
    }

    /// The thematic area a question belongs to.
    pub fn node_for(&self, question: &str) -> Option<&TaxonomyNode> {
        self.index.get(question).map(|&i| &self.nodes[i])
    }

    /// Pillar names in first-appearance order.
    pub fn pillars(&self) -> Vec<&str> {
        let mut pillars: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if !pillars.contains(&node.pillar.as_str()) {
                pillars.push(&node.pillar);
            }
        }
        pillars
    }

    /// Total number of questions across all areas.
    pub fn question_count(&self) -> usize {
        self.index.len()
    }
}

/// Expand a range like `Q1-Q4` into `["Q1", "Q2", "Q3", "Q4"]`.
pub fn parse_question_range(range: &str) -> Result<Vec<String>, TaxonomyError> {
    let invalid = || TaxonomyError::InvalidRange(range.to_string());

    let (start, end) = range.split_once('-').ok_or_else(invalid)?;
    let start = question_number(start.trim()).ok_or_else(invalid)?;
    let end = question_number(end.trim()).ok_or_else(invalid)?;

    if start > end {
        return Err(invalid());
    }

    Ok((start..=end).map(|n| format!("Q{}", n)).collect())
}

fn question_number(id: &str) -> Option<u32> {
    id.strip_prefix('Q')?.parse().ok()
}

/// Remove a leading `1.`, `1.1.` or `2. ` style prefix from a name.
pub fn strip_numbering(name: &str) -> &str {
    let rest = name.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.');
    if rest.len() != name.len() && rest.starts_with(' ') {
        rest.trim_start()
    } else {
        name
    }
}
