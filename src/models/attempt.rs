// src/models/attempt.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of a single resolved question within an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    pub question_id: String,
    pub selected_option_ids: Vec<String>,
    pub is_correct: bool,
    pub score: u32,
    pub max_points: u32,
}

/// Represents the 'attempts' table in the database.
/// Written once per submission and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: String,
    pub quiz_id: String,
    pub total_score: u64,
    pub max_score: u64,
    pub percentage: u32,
    pub completed_at: DateTime<Utc>,
    pub results: Vec<AttemptResult>,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitAttemptRequest {
    /// Key: question id, value: selected option ids.
    #[serde(default)]
    pub answers: HashMap<String, Vec<String>>,
}
