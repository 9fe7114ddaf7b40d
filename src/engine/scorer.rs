// src/engine/scorer.rs

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    attempt::{Attempt, AttemptResult},
    question::RuntimeQuestion,
};

/// Aggregate outcome of grading a resolved question sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    pub total_score: u64,
    pub max_score: u64,
    pub percentage: u32,
    pub results: Vec<AttemptResult>,
}

impl Scorecard {
    /// Stamps the scorecard with a fresh id and completion time.
    pub fn into_attempt(self, quiz_id: &str) -> Attempt {
        Attempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            total_score: self.total_score,
            max_score: self.max_score,
            percentage: self.percentage,
            completed_at: Utc::now(),
            results: self.results,
        }
    }
}

/// Grades one question.
///
/// Correct only if as many ids were selected as there are correct options and
/// every selected id is a correct one. Partial overlap earns nothing.
pub fn grade_question(question: &RuntimeQuestion, selected: &[String]) -> AttemptResult {
    let correct: Vec<&str> = question.question.correct_option_ids().collect();

    let is_correct = selected.len() == correct.len()
        && selected.iter().all(|id| correct.contains(&id.as_str()));
    let points = question.question.points;

    AttemptResult {
        question_id: question.question.id.clone(),
        selected_option_ids: selected.to_vec(),
        is_correct,
        score: if is_correct { points } else { 0 },
        max_points: points,
    }
}

/// Grades every resolved question, duplicates included.
/// Answers for questions outside `questions` are ignored.
pub fn score(questions: &[RuntimeQuestion], answers: &HashMap<String, Vec<String>>) -> Scorecard {
    let results: Vec<AttemptResult> = questions
        .iter()
        .map(|q| {
            let selected = answers
                .get(&q.question.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            grade_question(q, selected)
        })
        .collect();

    let total_score = results.iter().map(|r| u64::from(r.score)).sum();
    let max_score = results.iter().map(|r| u64::from(r.max_points)).sum();

    Scorecard {
        total_score,
        max_score,
        percentage: percentage(total_score, max_score),
        results,
    }
}

/// `total / max` as a whole percentage, rounding halves up. Zero when `max` is zero.
pub fn percentage(total: u64, max: u64) -> u32 {
    if max == 0 {
        return 0;
    }
    let (total, max) = (u128::from(total), u128::from(max));
    ((200 * total + max) / (2 * max)) as u32
}
