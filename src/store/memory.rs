// src/store/memory.rs

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::{
        attempt::Attempt, course::Course, question::Question, quiz::Quiz, quiz_item::QuizItem,
    },
    store::QuizStore,
};

#[derive(Debug, Default)]
struct Tables {
    courses: Vec<Course>,
    quizzes: Vec<Quiz>,
    questions: Vec<Question>,
    quiz_items: Vec<QuizItem>,
    attempts: Vec<Attempt>,
}

/// Process-local store backed by insertion-ordered vectors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_unique<'a>(
    kind: &str,
    mut existing: impl Iterator<Item = &'a str>,
    id: &str,
) -> Result<(), AppError> {
    if existing.any(|e| e == id) {
        return Err(AppError::Conflict(format!("{} '{}' already exists", kind, id)));
    }
    Ok(())
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.tables.read().await.courses.clone())
    }

    async fn get_course(&self, id: &str) -> Result<Option<Course>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_course(&self, course: &Course) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        ensure_unique(
            "Course",
            tables.courses.iter().map(|c| c.id.as_str()),
            &course.id,
        )?;
        tables.courses.push(course.clone());
        Ok(())
    }

    async fn delete_course(&self, id: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        Ok(tables.courses.len() != before)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        Ok(self.tables.read().await.quizzes.clone())
    }

    async fn get_quiz(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.quizzes.iter().find(|q| q.id == id).cloned())
    }

    async fn quizzes_for_course(&self, course_id: &str) -> Result<Vec<Quiz>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .quizzes
            .iter()
            .filter(|q| q.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn insert_quiz(&self, quiz: &Quiz) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        ensure_unique("Quiz", tables.quizzes.iter().map(|q| q.id.as_str()), &quiz.id)?;
        tables.quizzes.push(quiz.clone());
        Ok(())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.tables.read().await.questions.clone())
    }

    async fn get_question(&self, id: &str) -> Result<Option<Question>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn insert_question(&self, question: &Question) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        ensure_unique(
            "Question",
            tables.questions.iter().map(|q| q.id.as_str()),
            &question.id,
        )?;
        tables.questions.push(question.clone());
        Ok(())
    }

    async fn list_quiz_items(&self) -> Result<Vec<QuizItem>, AppError> {
        Ok(self.tables.read().await.quiz_items.clone())
    }

    async fn items_for_quiz(&self, quiz_id: &str) -> Result<Vec<QuizItem>, AppError> {
        let tables = self.tables.read().await;
        let mut items: Vec<QuizItem> = tables
            .quiz_items
            .iter()
            .filter(|i| i.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.position);
        Ok(items)
    }

    async fn replace_quiz_items(&self, quiz_id: &str, items: &[QuizItem]) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let mut kept: Vec<QuizItem> = tables
            .quiz_items
            .iter()
            .filter(|i| i.quiz_id != quiz_id)
            .cloned()
            .collect();
        for item in items {
            ensure_unique("Quiz item", kept.iter().map(|i| i.id.as_str()), &item.id)?;
            kept.push(item.clone());
        }
        // Only commit once every item was accepted.
        tables.quiz_items = kept;
        Ok(())
    }

    async fn insert_attempt(&self, attempt: &Attempt) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        ensure_unique(
            "Attempt",
            tables.attempts.iter().map(|a| a.id.as_str()),
            &attempt.id,
        )?;
        tables.attempts.push(attempt.clone());
        Ok(())
    }

    async fn attempts_for_quiz(&self, quiz_id: &str) -> Result<Vec<Attempt>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .attempts
            .iter()
            .filter(|a| a.quiz_id == quiz_id)
            .cloned()
            .collect())
    }
}
