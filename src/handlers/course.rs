// src/handlers/course.rs

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
    error::AppError,
    models::course::{Course, CreateCourseRequest},
    state::SharedStore,
    utils::html::clean_html,
};

/// Lists all courses in creation order.
pub async fn list_courses(State(store): State<SharedStore>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.list_courses().await?))
}

/// Retrieves a single course by ID.
pub async fn get_course(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let course = store
        .get_course(&id)
        .await?
        .ok_or(AppError::NotFound("Course not found".to_string()))?;

    Ok(Json(course))
}

/// Lists the quizzes owned by a course.
/// An unknown course simply has no quizzes.
pub async fn list_course_quizzes(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(store.quizzes_for_course(&id).await?))
}

/// Creates a new course.
/// Admin only.
pub async fn create_course(
    State(store): State<SharedStore>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let course = Course {
        id: Uuid::new_v4().to_string(),
        title: clean_html(&payload.title),
        description: clean_html(&payload.description),
        created_at: Utc::now(),
    };
    store.insert_course(&course).await?;

    tracing::info!(course_id = %course.id, "Course created");
    Ok((StatusCode::CREATED, Json(course)))
}

/// Deletes a course by ID. Its quizzes are left in place.
/// Admin only.
pub async fn delete_course(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !store.delete_course(&id).await? {
        return Err(AppError::NotFound("Course not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
