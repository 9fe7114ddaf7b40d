// src/service.rs

//! Entry points that bridge the record store and the resolution engine.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    engine::{
        catalog::Catalog,
        resolver::{self, ResolveOptions},
        scorer,
    },
    error::AppError,
    models::{attempt::Attempt, question::RuntimeQuestion, quiz::Quiz},
    store::QuizStore,
};

/// Everything the quiz-taking view needs before rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetails {
    pub quiz: Quiz,
    pub questions: Vec<RuntimeQuestion>,
    pub total_points: u64,
}

/// Loads a quiz and its resolved question sequence.
///
/// Fails with `NotFound` when the quiz itself does not exist.
pub async fn get_quiz_details(
    store: &dyn QuizStore,
    quiz_id: &str,
    options: ResolveOptions,
) -> Result<QuizDetails, AppError> {
    let quiz = store
        .get_quiz(quiz_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Quiz '{}' not found", quiz_id)))?;

    let catalog = Catalog::load(store).await?;
    let questions = resolver::resolve(&catalog, quiz_id, options)?;
    let total_points = resolver::total_points(&questions);

    Ok(QuizDetails {
        quiz,
        questions,
        total_points,
    })
}

/// Scores `answers` against a fresh resolution of the quiz and appends the attempt.
///
/// Nothing is written when the quiz does not exist.
pub async fn submit_attempt(
    store: &dyn QuizStore,
    quiz_id: &str,
    answers: &HashMap<String, Vec<String>>,
    options: ResolveOptions,
) -> Result<Attempt, AppError> {
    let details = get_quiz_details(store, quiz_id, options).await?;

    let attempt = scorer::score(&details.questions, answers).into_attempt(quiz_id);
    store.insert_attempt(&attempt).await?;

    tracing::info!(
        attempt_id = %attempt.id,
        quiz_id,
        total_score = attempt.total_score,
        max_score = attempt.max_score,
        percentage = attempt.percentage,
        "Attempt recorded"
    );

    Ok(attempt)
}
