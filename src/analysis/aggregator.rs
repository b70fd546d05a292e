//! Score aggregation.
//!
//! Folds per-question scores into thematic-area scores and thematic-area
//! scores into pillar scores.

use crate::models::{Assessment, PillarScore, QuestionMap, ThematicScore};
use crate::taxonomy::{Taxonomy, TaxonomyNode};
use tracing::debug;

/// Default threshold for the below-minimum flag.
pub const DEFAULT_MINIMUM_STANDARD: f64 = 0.25;

/// Aggregate a validated submission over the taxonomy.
///
/// Each area's score is the sum of yes-weights divided by the sum of the
/// weights present in the submission. Areas with nothing answered, or only
/// zero weights, score 0. An area is below minimum when its score is
/// strictly less than `minimum_standard`.
pub fn aggregate(
    questions: &QuestionMap,
    taxonomy: &Taxonomy,
    minimum_standard: f64,
) -> Assessment {
    let thematic: Vec<ThematicScore> = taxonomy
        .nodes()
        .iter()
        .map(|node| score_thematic(node, questions, minimum_standard))
        .collect();

    let pillars = taxonomy
        .pillars()
        .into_iter()
        .map(|pillar| {
            let scores: Vec<f64> = thematic
                .iter()
                .filter(|t| t.pillar == pillar)
                .map(|t| t.score)
                .collect();
            PillarScore {
                pillar: pillar.to_string(),
                score: mean(&scores),
            }
        })
        .collect();

    Assessment {
        thematic,
        pillars,
        minimum_standard,
    }
}

fn score_thematic(
    node: &TaxonomyNode,
    questions: &QuestionMap,
    minimum_standard: f64,
) -> ThematicScore {
    let (raw_score, attainable) = node
        .questions
        .iter()
        .filter_map(|id| questions.get(id))
        .fold((0.0, 0.0), |(raw, max), entry| {
            (raw + entry.score(), max + entry.weight)
        });

    let score = if attainable > 0.0 {
        (raw_score / attainable).clamp(0.0, 1.0)
    } else {
        0.0
    };

    debug!(
        "{}: {:.3}/{:.3} -> {:.3}",
        node.thematic, raw_score, attainable, score
    );

    ThematicScore {
        pillar: node.pillar.clone(),
        thematic: node.thematic.clone(),
        score,
        raw_score,
        attainable,
        below_minimum: score < minimum_standard,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Display names of the areas below minimum, in taxonomy order.
pub fn below_minimum_names(assessment: &Assessment) -> Vec<String> {
    assessment
        .below_minimum()
        .into_iter()
        .map(|t| crate::taxonomy::strip_numbering(&t.thematic).to_string())
        .collect()
}
