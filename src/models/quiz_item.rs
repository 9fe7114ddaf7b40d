// src/models/quiz_item.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// What a quiz item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum QuizItemType {
    /// `target_id` is a question id.
    Question,
    /// `target_id` is a quiz id whose resolved content is inlined.
    QuizRef,
}

/// Represents the 'quiz_items' table in the database.
/// One positioned slot of a quiz.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub id: String,
    pub quiz_id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub item_type: QuizItemType,
    pub target_id: String,
    pub position: i64,
}

/// One entry of a `PUT /quizzes/{id}/items` payload.
/// The quiz id and position come from the request path and list order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItemInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub item_type: QuizItemType,
    pub target_id: String,
}

/// DTO for replacing the item list of a quiz.
#[derive(Debug, Deserialize)]
pub struct SaveItemsRequest {
    pub items: Vec<QuizItemInput>,
}
