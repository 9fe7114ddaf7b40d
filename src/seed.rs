// src/seed.rs

use chrono::Utc;

use crate::{
    error::AppError,
    models::{
        course::Course,
        question::{Question, QuizOption},
        quiz::{Quiz, QuizSettings},
        quiz_item::{QuizItem, QuizItemType},
    },
    store::QuizStore,
};

fn option(id: &str, text: &str, is_correct: bool) -> QuizOption {
    QuizOption {
        id: id.to_string(),
        text: text.to_string(),
        is_correct,
    }
}

fn item(id: &str, quiz_id: &str, item_type: QuizItemType, target_id: &str, position: i64) -> QuizItem {
    QuizItem {
        id: id.to_string(),
        quiz_id: quiz_id.to_string(),
        item_type,
        target_id: target_id.to_string(),
        position,
    }
}

/// Inserts the demo course unless the store already holds courses.
/// Returns whether anything was written.
pub async fn seed_demo(store: &dyn QuizStore) -> Result<bool, AppError> {
    if !store.list_courses().await?.is_empty() {
        return Ok(false);
    }

    let now = Utc::now();

    store
        .insert_course(&Course {
            id: "c1".to_string(),
            title: "Introduction to Computer Science".to_string(),
            description: "Basics of algos and data structures.".to_string(),
            created_at: now,
        })
        .await?;

    let quizzes = [
        ("q1", "Algorithms 101", "Basic sorting.", false, None, true),
        ("q2", "Data Structures 101", "Arrays and Lists.", false, None, true),
        (
            "q3",
            "Midterm Exam (Composite)",
            "Combined knowledge test.",
            true,
            Some(30),
            false,
        ),
    ];
    for (id, title, description, is_composite, time_limit, show_correct_answers) in quizzes {
        store
            .insert_quiz(&Quiz {
                id: id.to_string(),
                course_id: "c1".to_string(),
                title: title.to_string(),
                description: description.to_string(),
                is_composite,
                settings: QuizSettings {
                    time_limit,
                    show_correct_answers,
                },
                created_at: now,
            })
            .await?;
    }

    let questions = [
        Question {
            id: "qq1".to_string(),
            text: "What is the time complexity of Merge Sort?".to_string(),
            points: 5,
            allow_multiple: false,
            options: vec![
                option("o1", "O(n)", false),
                option("o2", "O(n log n)", true),
                option("o3", "O(n^2)", false),
            ],
        },
        Question {
            id: "qq2".to_string(),
            text: "Which data structure uses LIFO?".to_string(),
            points: 5,
            allow_multiple: false,
            options: vec![
                option("o4", "Queue", false),
                option("o5", "Stack", true),
                option("o6", "Tree", false),
            ],
        },
        Question {
            id: "qq3".to_string(),
            text: "Select all stable sorting algorithms.".to_string(),
            points: 10,
            allow_multiple: true,
            options: vec![
                option("o7", "Merge Sort", true),
                option("o8", "Quick Sort", false),
                option("o9", "Bubble Sort", true),
            ],
        },
    ];
    for question in &questions {
        store.insert_question(question).await?;
    }

    store
        .replace_quiz_items("q1", &[item("i1", "q1", QuizItemType::Question, "qq1", 0)])
        .await?;
    store
        .replace_quiz_items("q2", &[item("i2", "q2", QuizItemType::Question, "qq2", 0)])
        .await?;
    store
        .replace_quiz_items(
            "q3",
            &[
                item("i3", "q3", QuizItemType::QuizRef, "q1", 0),
                item("i4", "q3", QuizItemType::QuizRef, "q2", 1),
                item("i5", "q3", QuizItemType::Question, "qq3", 2),
            ],
        )
        .await?;

    tracing::info!("Seeded demo course 'c1' with quizzes q1, q2 and q3");
    Ok(true)
}
