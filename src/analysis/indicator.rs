//! Answer pattern keys used to look up pre-authored summaries.

use crate::models::QuestionMap;
use crate::taxonomy::TaxonomyNode;

/// Build the `1`/`0` pattern for a thematic area, one character per
/// question in taxonomy order. Absent questions count as `0`.
pub fn answer_indicator(node: &TaxonomyNode, questions: &QuestionMap) -> String {
    node.questions
        .iter()
        .map(|id| match questions.get(id) {
            Some(entry) if entry.answer.is_yes() => '1',
            _ => '0',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_submission;
    use crate::taxonomy::Taxonomy;

    #[test]
    fn test_indicator_with_absent_question() {
        let taxonomy = Taxonomy::drm();
        let questions = parse_submission("Q1,Yes,1;Q2,No,1;Q4,yes,0.5", &taxonomy).unwrap();
        let node = taxonomy.node_for("Q1").unwrap();
        assert_eq!(answer_indicator(node, &questions), "1001");
    }

    #[test]
    fn test_indicator_length_matches_area() {
        let taxonomy = Taxonomy::drm();
        let questions = parse_submission("Q20,Yes,1", &taxonomy).unwrap();
        let node = taxonomy.node_for("Q20").unwrap();
        assert_eq!(answer_indicator(node, &questions), "0010000000");
    }

    #[test]
    fn test_yes_with_zero_weight_is_still_yes() {
        let taxonomy = Taxonomy::drm();
        let questions = parse_submission("Q45,Yes,0", &taxonomy).unwrap();
        let node = taxonomy.node_for("Q45").unwrap();
        assert_eq!(answer_indicator(node, &questions), "100");
    }
}
