// src/store/mod.rs

//! Record persistence for courses, quizzes, questions, quiz items and attempts.

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        attempt::Attempt, course::Course, question::Question, quiz::Quiz, quiz_item::QuizItem,
    },
};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Keyed record storage consumed by the quiz service and the admin handlers.
///
/// Callers supply ids and timestamps. List operations return records in
/// insertion order, except `items_for_quiz` which orders by position.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, AppError>;
    async fn get_course(&self, id: &str) -> Result<Option<Course>, AppError>;
    async fn insert_course(&self, course: &Course) -> Result<(), AppError>;
    /// Returns `false` when nothing was deleted. Quizzes of the course are kept.
    async fn delete_course(&self, id: &str) -> Result<bool, AppError>;

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError>;
    async fn get_quiz(&self, id: &str) -> Result<Option<Quiz>, AppError>;
    async fn quizzes_for_course(&self, course_id: &str) -> Result<Vec<Quiz>, AppError>;
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<(), AppError>;

    async fn list_questions(&self) -> Result<Vec<Question>, AppError>;
    async fn get_question(&self, id: &str) -> Result<Option<Question>, AppError>;
    async fn insert_question(&self, question: &Question) -> Result<(), AppError>;

    async fn list_quiz_items(&self) -> Result<Vec<QuizItem>, AppError>;
    async fn items_for_quiz(&self, quiz_id: &str) -> Result<Vec<QuizItem>, AppError>;
    /// Drops every item of `quiz_id`, then inserts `items` in order.
    async fn replace_quiz_items(&self, quiz_id: &str, items: &[QuizItem]) -> Result<(), AppError>;

    /// Appends an attempt. Existing attempts are never touched.
    async fn insert_attempt(&self, attempt: &Attempt) -> Result<(), AppError>;
    async fn attempts_for_quiz(&self, quiz_id: &str) -> Result<Vec<Attempt>, AppError>;
}
