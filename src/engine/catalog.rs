// src/engine/catalog.rs

use std::collections::{HashMap, HashSet};

use crate::{
    engine::resolver::QuizSource,
    error::AppError,
    models::{question::Question, quiz::Quiz, quiz_item::QuizItem},
    store::QuizStore,
};

/// Read-only snapshot of the records resolution needs.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    quiz_ids: HashSet<String>,
    questions: HashMap<String, Question>,
    items_by_quiz: HashMap<String, Vec<QuizItem>>,
}

impl Catalog {
    /// Builds a snapshot. Items keep their relative order within a quiz
    /// except where `position` says otherwise.
    pub fn new(
        quizzes: impl IntoIterator<Item = Quiz>,
        questions: impl IntoIterator<Item = Question>,
        items: impl IntoIterator<Item = QuizItem>,
    ) -> Self {
        let quiz_ids = quizzes.into_iter().map(|q| q.id).collect();

        let mut by_id = HashMap::new();
        for question in questions {
            // First record wins on duplicate ids.
            by_id.entry(question.id.clone()).or_insert(question);
        }

        let mut items_by_quiz: HashMap<String, Vec<QuizItem>> = HashMap::new();
        for item in items {
            items_by_quiz
                .entry(item.quiz_id.clone())
                .or_default()
                .push(item);
        }
        for items in items_by_quiz.values_mut() {
            // sort_by_key is stable
            items.sort_by_key(|i| i.position);
        }

        Self {
            quiz_ids,
            questions: by_id,
            items_by_quiz,
        }
    }

    /// Reads quizzes, questions and items from the store in one pass.
    pub async fn load(store: &dyn QuizStore) -> Result<Self, AppError> {
        let quizzes = store.list_quizzes().await?;
        let questions = store.list_questions().await?;
        let items = store.list_quiz_items().await?;

        tracing::debug!(
            quizzes = quizzes.len(),
            questions = questions.len(),
            items = items.len(),
            "Loaded catalog snapshot"
        );

        Ok(Self::new(quizzes, questions, items))
    }
}

impl QuizSource for Catalog {
    fn items_for(&self, quiz_id: &str) -> &[QuizItem] {
        self.items_by_quiz
            .get(quiz_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions.get(question_id)
    }

    fn has_quiz(&self, quiz_id: &str) -> bool {
        self.quiz_ids.contains(quiz_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz_item::QuizItemType;

    fn item(id: &str, quiz_id: &str, position: i64) -> QuizItem {
        QuizItem {
            id: id.to_string(),
            quiz_id: quiz_id.to_string(),
            item_type: QuizItemType::Question,
            target_id: format!("t_{}", id),
            position,
        }
    }

    #[test]
    fn test_items_sorted_by_position_with_stable_ties() {
        let catalog = Catalog::new(
            Vec::<Quiz>::new(),
            Vec::<Question>::new(),
            vec![
                item("a", "q", 2),
                item("b", "q", 1),
                item("c", "q", 1),
                item("d", "other", 0),
                item("e", "q", 0),
            ],
        );

        let ids: Vec<&str> = catalog.items_for("q").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["e", "b", "c", "a"]);
        assert_eq!(catalog.items_for("other").len(), 1);
        assert!(catalog.items_for("missing").is_empty());
    }
}
