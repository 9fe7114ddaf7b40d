// src/handlers/question.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::question::{CreateQuestionRequest, Question, QuizOption},
    state::SharedStore,
    utils::html::clean_html,
};

/// Creates a new question.
/// Admin only.
///
/// Options without an id get a generated one. When `allowMultiple` is omitted
/// it is set if more than one option is marked correct.
pub async fn create_question(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let correct_count = payload.options.iter().filter(|o| o.is_correct).count();
    let options: Vec<QuizOption> = payload
        .options
        .into_iter()
        .map(|o| QuizOption {
            id: o
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().simple().to_string()),
            text: clean_html(&o.text),
            is_correct: o.is_correct,
        })
        .collect();

    let mut seen = std::collections::HashSet::new();
    if !options.iter().all(|o| seen.insert(o.id.as_str())) {
        return Err(AppError::BadRequest("Option ids must be unique".to_string()));
    }

    let question = Question {
        id: Uuid::new_v4().to_string(),
        text: clean_html(&payload.text),
        points: payload.points,
        allow_multiple: payload.allow_multiple.unwrap_or(correct_count > 1),
        options,
    };
    store.insert_question(&question).await?;

    Ok((StatusCode::CREATED, Json(question)))
}

/// Retrieves a single question by ID.
/// Admin only.
pub async fn get_question(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let question = store
        .get_question(&id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}
