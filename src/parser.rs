//! Submission parsing and validation.
//!
//! Turns pasted `Q#,Yes/No,Weight;...` text into a [`QuestionMap`].
//! Validation stops at the first bad entry.

use crate::models::{Answer, QuestionEntry, QuestionMap};
use crate::taxonomy::Taxonomy;
use thiserror::Error;
use tracing::debug;

const ENTRY_DELIMITER: char = ';';
const FIELD_DELIMITER: char = ',';

/// Field of an entry that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Question,
    Answer,
    Weight,
}

/// Why a submission was rejected.
///
/// `position` is the 1-based index of the offending entry among the
/// non-empty entries; `entry` is its trimmed text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("No question entries provided")]
    Empty,

    #[error("Invalid entry format (expected Q#,Yes/No,Weight) at entry {position}: {entry}")]
    Format {
        position: usize,
        entry: String,
        fields: usize,
    },

    #[error("Unknown question ID at entry {position}: {question}")]
    UnknownQuestion {
        position: usize,
        entry: String,
        question: String,
    },

    #[error("Invalid answer for {question} (must be Yes or No): {answer}")]
    InvalidAnswer {
        position: usize,
        entry: String,
        question: String,
        answer: String,
    },

    #[error("Weight for {question} must be a number between 0 and 1: {weight}")]
    InvalidWeight {
        position: usize,
        entry: String,
        question: String,
        weight: String,
    },
}

impl ParseError {
    /// The offending entry text, if the error concerns a single entry.
    pub fn entry(&self) -> Option<&str> {
        match self {
            ParseError::Empty => None,
            ParseError::Format { entry, .. }
            | ParseError::UnknownQuestion { entry, .. }
            | ParseError::InvalidAnswer { entry, .. }
            | ParseError::InvalidWeight { entry, .. } => Some(entry),
        }
    }

    /// The offending field, if one could be isolated.
    pub fn field(&self) -> Option<Field> {
        match self {
            ParseError::Empty | ParseError::Format { .. } => None,
            ParseError::UnknownQuestion { .. } => Some(Field::Question),
            ParseError::InvalidAnswer { .. } => Some(Field::Answer),
            ParseError::InvalidWeight { .. } => Some(Field::Weight),
        }
    }
}

/// Parse and validate a submission against `taxonomy`.
///
/// A question listed more than once keeps its last entry.
pub fn parse_submission(raw: &str, taxonomy: &Taxonomy) -> Result<QuestionMap, ParseError> {
    let entries: Vec<&str> = raw
        .split(ENTRY_DELIMITER)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();

    if entries.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut questions = QuestionMap::new();

    for (i, entry) in entries.into_iter().enumerate() {
        let parsed = parse_entry(i + 1, entry, taxonomy)?;
        if questions.insert(parsed.id.clone(), parsed).is_some() {
            debug!("Entry {} overrides an earlier answer", i + 1);
        }
    }

    debug!("Parsed {} question entries", questions.len());
    Ok(questions)
}

fn parse_entry(
    position: usize,
    entry: &str,
    taxonomy: &Taxonomy,
) -> Result<QuestionEntry, ParseError> {
    let fields: Vec<&str> = entry.split(FIELD_DELIMITER).map(str::trim).collect();

    let [id, answer, weight] = fields[..] else {
        return Err(ParseError::Format {
            position,
            entry: entry.to_string(),
            fields: fields.len(),
        });
    };

    if taxonomy.node_for(id).is_none() {
        return Err(ParseError::UnknownQuestion {
            position,
            entry: entry.to_string(),
            question: id.to_string(),
        });
    }

    let answer_value = Answer::parse(answer).ok_or_else(|| ParseError::InvalidAnswer {
        position,
        entry: entry.to_string(),
        question: id.to_string(),
        answer: answer.to_string(),
    })?;

    let weight_value = parse_weight(weight).ok_or_else(|| ParseError::InvalidWeight {
        position,
        entry: entry.to_string(),
        question: id.to_string(),
        weight: weight.to_string(),
    })?;

    debug!("{}: {} ({})", id, answer_value, weight_value);
    Ok(QuestionEntry {
        id: id.to_string(),
        answer: answer_value,
        weight: weight_value,
    })
}

fn parse_weight(raw: &str) -> Option<f64> {
    let value: f64 = raw.parse().ok()?;
    (0.0..=1.0).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<QuestionMap, ParseError> {
        parse_submission(raw, &Taxonomy::drm())
    }

    #[test]
    fn test_parse_valid_submission() {
        let questions = parse("Q1,Yes,1;Q2,No,0.5").unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions["Q1"].answer, Answer::Yes);
        assert_eq!(questions["Q1"].weight, 1.0);
        assert_eq!(questions["Q2"].answer, Answer::No);
        assert_eq!(questions["Q2"].weight, 0.5);
    }

    #[test]
    fn test_whitespace_and_trailing_delimiter() {
        let questions = parse("  Q1 , yes , 0.25 ;\n Q3,NO,1 ; ").unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions["Q1"].weight, 0.25);
        assert_eq!(questions["Q3"].answer, Answer::No);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert_eq!(parse(" ; ;"), Err(ParseError::Empty));
    }

    #[test]
    fn test_missing_field_is_format_error() {
        let err = parse("Q1,Yes").unwrap_err();
        assert!(matches!(err, ParseError::Format { fields: 2, position: 1, .. }));
        assert_eq!(err.entry(), Some("Q1,Yes"));
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_extra_field_is_format_error() {
        let err = parse("Q1,Yes,1,extra").unwrap_err();
        assert!(matches!(err, ParseError::Format { fields: 4, .. }));
    }

    #[test]
    fn test_invalid_answer() {
        let err = parse("Q1,Maybe,1").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAnswer { ref answer, .. } if answer == "Maybe"));
        assert_eq!(err.field(), Some(Field::Answer));
    }

    #[test]
    fn test_weight_out_of_range() {
        let err = parse("Q1,Yes,1.5").unwrap_err();
        assert!(matches!(err, ParseError::InvalidWeight { ref weight, .. } if weight == "1.5"));
        assert_eq!(err.field(), Some(Field::Weight));

        assert!(matches!(
            parse("Q1,Yes,-0.1"),
            Err(ParseError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn test_weight_not_numeric() {
        for weight in ["abc", "", "NaN", "inf"] {
            let raw = format!("Q1,Yes,{}", weight);
            assert!(
                matches!(parse(&raw), Err(ParseError::InvalidWeight { .. })),
                "weight {:?} should be rejected",
                weight
            );
        }
    }

    #[test]
    fn test_weight_boundaries_accepted() {
        let questions = parse("Q1,Yes,0;Q2,Yes,1").unwrap();
        assert_eq!(questions["Q1"].weight, 0.0);
        assert_eq!(questions["Q2"].weight, 1.0);
    }

    #[test]
    fn test_unknown_question() {
        let err = parse("Q99,Yes,1").unwrap_err();
        assert!(matches!(err, ParseError::UnknownQuestion { ref question, .. } if question == "Q99"));
        assert_eq!(err.field(), Some(Field::Question));
    }

    #[test]
    fn test_stops_at_first_error() {
        let err = parse("Q1,Yes,1;Q2,Maybe,1;Q99,Yes,1").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAnswer { position: 2, .. }));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let questions = parse("Q1,Yes,1;Q1,No,0.5").unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions["Q1"].answer, Answer::No);
        assert_eq!(questions["Q1"].weight, 0.5);
    }

    #[test]
    fn test_error_messages_name_the_entry() {
        let err = parse("Q1,Yes,1;Q7").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid entry format (expected Q#,Yes/No,Weight) at entry 2: Q7"
        );
    }
}
