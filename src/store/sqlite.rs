// src/store/sqlite.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool, sqlite::SqlitePoolOptions, types::Json};

use crate::{
    error::AppError,
    models::{
        attempt::{Attempt, AttemptResult},
        course::Course,
        question::{Question, QuizOption},
        quiz::{Quiz, QuizSettings},
        quiz_item::QuizItem,
    },
    store::QuizStore,
};

/// Row of the 'quizzes' table. Settings are stored as a JSON document.
#[derive(FromRow)]
struct QuizRow {
    id: String,
    course_id: String,
    title: String,
    description: String,
    is_composite: bool,
    settings: Json<QuizSettings>,
    created_at: DateTime<Utc>,
}

impl From<QuizRow> for Quiz {
    fn from(row: QuizRow) -> Self {
        Quiz {
            id: row.id,
            course_id: row.course_id,
            title: row.title,
            description: row.description,
            is_composite: row.is_composite,
            settings: row.settings.0,
            created_at: row.created_at,
        }
    }
}

/// Row of the 'questions' table. Options are stored as a JSON array.
#[derive(FromRow)]
struct QuestionRow {
    id: String,
    text: String,
    points: u32,
    allow_multiple: bool,
    options: Json<Vec<QuizOption>>,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: row.id,
            text: row.text,
            points: row.points,
            allow_multiple: row.allow_multiple,
            options: row.options.0,
        }
    }
}

/// Row of the 'attempts' table. Per-question results are stored as a JSON array.
#[derive(FromRow)]
struct AttemptRow {
    id: String,
    quiz_id: String,
    total_score: i64,
    max_score: i64,
    percentage: u32,
    completed_at: DateTime<Utc>,
    results: Json<Vec<AttemptResult>>,
}

impl TryFrom<AttemptRow> for Attempt {
    type Error = AppError;

    fn try_from(row: AttemptRow) -> Result<Self, Self::Error> {
        Ok(Attempt {
            id: row.id,
            quiz_id: row.quiz_id,
            total_score: column_to_score(row.total_score)?,
            max_score: column_to_score(row.max_score)?,
            percentage: row.percentage,
            completed_at: row.completed_at,
            results: row.results.0,
        })
    }
}

// SQLite integers are signed 64-bit
fn score_to_column(score: u64) -> Result<i64, AppError> {
    i64::try_from(score)
        .map_err(|_| AppError::BadRequest(format!("Score {} is too large to store", score)))
}

fn column_to_score(value: i64) -> Result<u64, AppError> {
    u64::try_from(value)
        .map_err(|_| AppError::InternalServerError(format!("Negative score {} in attempts table", value)))
}

const QUIZ_COLUMNS: &str =
    "SELECT id, course_id, title, description, is_composite, settings, created_at FROM quizzes";
const QUESTION_COLUMNS: &str =
    "SELECT id, text, points, allow_multiple, options FROM questions";
const ITEM_COLUMNS: &str = "SELECT id, quiz_id, type, target_id, position FROM quiz_items";

/// SQLite-backed store. Foreign keys between tables are not enforced.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl QuizStore for SqliteStore {
    async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, title, description, created_at FROM courses ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    async fn get_course(&self, id: &str) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, title, description, created_at FROM courses WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course)
    }

    async fn insert_course(&self, course: &Course) -> Result<(), AppError> {
        sqlx::query("INSERT INTO courses (id, title, description, created_at) VALUES (?, ?, ?, ?)")
            .bind(&course.id)
            .bind(&course.title)
            .bind(&course.description)
            .bind(course.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_course(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        let rows = sqlx::query_as::<_, QuizRow>(&format!("{} ORDER BY rowid", QUIZ_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Quiz::from).collect())
    }

    async fn get_quiz(&self, id: &str) -> Result<Option<Quiz>, AppError> {
        let row = sqlx::query_as::<_, QuizRow>(&format!("{} WHERE id = ?", QUIZ_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Quiz::from))
    }

    async fn quizzes_for_course(&self, course_id: &str) -> Result<Vec<Quiz>, AppError> {
        let rows = sqlx::query_as::<_, QuizRow>(&format!(
            "{} WHERE course_id = ? ORDER BY rowid",
            QUIZ_COLUMNS
        ))
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Quiz::from).collect())
    }

    async fn insert_quiz(&self, quiz: &Quiz) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO quizzes (id, course_id, title, description, is_composite, settings, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&quiz.id)
        .bind(&quiz.course_id)
        .bind(&quiz.title)
        .bind(&quiz.description)
        .bind(quiz.is_composite)
        .bind(Json(&quiz.settings))
        .bind(quiz.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_questions(&self) -> Result<Vec<Question>, AppError> {
        let rows =
            sqlx::query_as::<_, QuestionRow>(&format!("{} ORDER BY rowid", QUESTION_COLUMNS))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn get_question(&self, id: &str) -> Result<Option<Question>, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(&format!("{} WHERE id = ?", QUESTION_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Question::from))
    }

    async fn insert_question(&self, question: &Question) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO questions (id, text, points, allow_multiple, options) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&question.id)
        .bind(&question.text)
        .bind(question.points)
        .bind(question.allow_multiple)
        .bind(Json(&question.options))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_quiz_items(&self) -> Result<Vec<QuizItem>, AppError> {
        let items = sqlx::query_as::<_, QuizItem>(&format!("{} ORDER BY rowid", ITEM_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn items_for_quiz(&self, quiz_id: &str) -> Result<Vec<QuizItem>, AppError> {
        let items = sqlx::query_as::<_, QuizItem>(&format!(
            "{} WHERE quiz_id = ? ORDER BY position, rowid",
            ITEM_COLUMNS
        ))
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn replace_quiz_items(&self, quiz_id: &str, items: &[QuizItem]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM quiz_items WHERE quiz_id = ?")
            .bind(quiz_id)
            .execute(&mut *tx)
            .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO quiz_items (id, quiz_id, type, target_id, position) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&item.id)
            .bind(&item.quiz_id)
            .bind(item.item_type)
            .bind(&item.target_id)
            .bind(item.position)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn insert_attempt(&self, attempt: &Attempt) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO attempts (id, quiz_id, total_score, max_score, percentage, completed_at, results)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&attempt.id)
        .bind(&attempt.quiz_id)
        .bind(score_to_column(attempt.total_score)?)
        .bind(score_to_column(attempt.max_score)?)
        .bind(attempt.percentage)
        .bind(attempt.completed_at)
        .bind(Json(&attempt.results))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn attempts_for_quiz(&self, quiz_id: &str) -> Result<Vec<Attempt>, AppError> {
        let rows = sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT id, quiz_id, total_score, max_score, percentage, completed_at, results
            FROM attempts
            WHERE quiz_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Attempt::try_from).collect()
    }
}
