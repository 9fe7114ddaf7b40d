// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::{
        attempt::SubmitAttemptRequest,
        quiz::{CreateQuizRequest, Quiz},
        quiz_item::{QuizItem, QuizItemType, SaveItemsRequest},
    },
    service,
    state::SharedStore,
    utils::html::clean_html,
};

/// Returns the quiz, its resolved questions and the total points on offer.
pub async fn get_quiz_details(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let details = service::get_quiz_details(store.as_ref(), &id, config.resolve).await?;
    Ok(Json(details))
}

/// Scores the submitted answers and records the attempt.
///
/// Answers are keyed by question id. Keys that match no resolved question are ignored.
pub async fn submit_attempt(
    State(store): State<SharedStore>,
    State(config): State<Config>,
    Path(id): Path<String>,
    Json(req): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    let attempt = service::submit_attempt(store.as_ref(), &id, &req.answers, config.resolve).await?;
    Ok((StatusCode::CREATED, Json(attempt)))
}

/// Lists every quiz, e.g. to pick references for a composite quiz.
/// Admin only.
pub async fn list_quizzes(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_quizzes().await?))
}

/// Creates a new quiz with no items.
/// Admin only.
pub async fn create_quiz(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let quiz = Quiz {
        id: Uuid::new_v4().to_string(),
        course_id: payload.course_id,
        title: clean_html(&payload.title),
        description: clean_html(&payload.description),
        is_composite: payload.is_composite,
        settings: payload.settings,
        created_at: Utc::now(),
    };
    store.insert_quiz(&quiz).await?;

    tracing::info!(quiz_id = %quiz.id, course_id = %quiz.course_id, "Quiz created");
    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Lists the raw items of a quiz in position order.
/// Admin only.
pub async fn get_quiz_items(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.items_for_quiz(&id).await?))
}

/// Replaces the item list of a quiz.
/// Admin only.
///
/// * Positions follow the order of the submitted list.
/// * A quiz may not reference itself directly.
/// * Targets are not checked; dangling items are handled at resolution time.
pub async fn save_quiz_items(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(payload): Json<SaveItemsRequest>,
) -> Result<impl IntoResponse, AppError> {
    store
        .get_quiz(&id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    if payload
        .items
        .iter()
        .any(|i| i.item_type == QuizItemType::QuizRef && i.target_id == id)
    {
        return Err(AppError::BadRequest(
            "A quiz cannot include itself".to_string(),
        ));
    }

    let items: Vec<QuizItem> = payload
        .items
        .into_iter()
        .enumerate()
        .map(|(position, input)| QuizItem {
            id: input
                .id
                .filter(|item_id| !item_id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            quiz_id: id.clone(),
            item_type: input.item_type,
            target_id: input.target_id,
            position: position as i64,
        })
        .collect();

    store.replace_quiz_items(&id, &items).await?;

    tracing::info!(quiz_id = %id, items = items.len(), "Quiz items saved");
    Ok(Json(items))
}

/// Lists the recorded attempts of a quiz, oldest first.
/// Admin only.
pub async fn list_attempts(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.attempts_for_quiz(&id).await?))
}
