// src/models/question.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A selectable answer, owned by its question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub points: u32,
    /// Whether more than one option may be selected.
    pub allow_multiple: bool,
    pub options: Vec<QuizOption>,
}

impl Question {
    /// Ids of the options marked correct, in declaration order.
    pub fn correct_option_ids(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.is_correct)
            .map(|o| o.id.as_str())
    }
}

/// A question as delivered to a quiz taker.
///
/// `source_quiz_id` is the quiz whose item listed the question directly,
/// which for nested content is not the quiz that was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub source_quiz_id: String,
}

impl RuntimeQuestion {
    pub fn new(question: Question, source_quiz_id: impl Into<String>) -> Self {
        Self {
            question,
            source_quiz_id: source_quiz_id.into(),
        }
    }
}

/// DTO for one option of a new question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionInput {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
    #[serde(default = "default_points")]
    #[validate(range(max = MAX_QUESTION_POINTS))]
    pub points: u32,
    /// Derived from the number of correct options when omitted.
    #[serde(default)]
    pub allow_multiple: Option<bool>,
    #[validate(custom(function = validate_options))]
    pub options: Vec<OptionInput>,
}

/// Upper bound on points for a single question.
pub const MAX_QUESTION_POINTS: u32 = 1000;

fn default_points() -> u32 {
    1
}

fn validate_options(options: &[OptionInput]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    if !options.iter().any(|o| o.is_correct) {
        return Err(validator::ValidationError::new("no_correct_option"));
    }
    for opt in options {
        if opt.text.is_empty() || opt.text.len() > 500 {
            return Err(validator::ValidationError::new("invalid_option_text"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(text: &str, is_correct: bool) -> OptionInput {
        OptionInput {
            id: None,
            text: text.to_string(),
            is_correct,
        }
    }

    #[test]
    fn test_question_without_correct_option_is_rejected() {
        let req = CreateQuestionRequest {
            text: "Pick one".to_string(),
            points: 1,
            allow_multiple: None,
            options: vec![option("A", false), option("B", false)],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_question_with_correct_option_is_accepted() {
        let req = CreateQuestionRequest {
            text: "Pick one".to_string(),
            points: 1,
            allow_multiple: None,
            options: vec![option("A", true), option("B", false)],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_question_points_are_bounded() {
        let req = |points| CreateQuestionRequest {
            text: "Pick one".to_string(),
            points,
            allow_multiple: None,
            options: vec![option("A", true)],
        };
        assert!(req(MAX_QUESTION_POINTS).validate().is_ok());
        assert!(req(MAX_QUESTION_POINTS + 1).validate().is_err());
        assert!(req(u32::MAX).validate().is_err());
    }

    #[test]
    fn test_runtime_question_serializes_flat() {
        let q = RuntimeQuestion::new(
            Question {
                id: "qq1".to_string(),
                text: "?".to_string(),
                points: 5,
                allow_multiple: false,
                options: vec![],
            },
            "q1",
        );
        let value = serde_json::to_value(&q).unwrap();
        assert_eq!(value["id"], "qq1");
        assert_eq!(value["allowMultiple"], false);
        assert_eq!(value["sourceQuizId"], "q1");
    }
}
