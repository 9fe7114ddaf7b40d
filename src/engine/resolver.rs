// src/engine/resolver.rs

use std::fmt;
use std::str::FromStr;

use crate::{
    error::AppError,
    models::{
        question::{Question, RuntimeQuestion},
        quiz_item::{QuizItem, QuizItemType},
    },
};

/// Deepest nesting level that is still expanded. The top-level quiz is depth 0,
/// so a chain of up to `MAX_RESOLVE_DEPTH + 1` quizzes resolves fully.
pub const MAX_RESOLVE_DEPTH: usize = 5;

/// Read access to the records resolution walks over.
pub trait QuizSource {
    /// Items of `quiz_id`, already ordered by position.
    fn items_for(&self, quiz_id: &str) -> &[QuizItem];

    fn question(&self, question_id: &str) -> Option<&Question>;

    fn has_quiz(&self, quiz_id: &str) -> bool;
}

/// What to do with an item whose target no longer exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DanglingPolicy {
    /// Drop the item and keep going.
    #[default]
    Skip,
    /// Abort the resolution with `AppError::DanglingReference`.
    Fail,
}

impl FromStr for DanglingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(DanglingPolicy::Skip),
            "fail" => Ok(DanglingPolicy::Fail),
            other => Err(format!("unknown dangling reference policy '{}'", other)),
        }
    }
}

impl fmt::Display for DanglingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DanglingPolicy::Skip => f.write_str("skip"),
            DanglingPolicy::Fail => f.write_str("fail"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub max_depth: usize,
    pub on_dangling: DanglingPolicy,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_RESOLVE_DEPTH,
            on_dangling: DanglingPolicy::Skip,
        }
    }
}

/// Flattens a quiz into the ordered list of questions a taker will see.
///
/// * Items are visited in position order.
/// * A `question` item contributes its question, tagged with the owning quiz.
/// * A `quiz_ref` item contributes the full resolution of the referenced quiz.
/// * Nothing is deduplicated: a question reachable twice appears twice.
/// * Branches deeper than `max_depth` are cut off, which also breaks cycles.
pub struct Resolver<'a, S: QuizSource + ?Sized> {
    source: &'a S,
    options: ResolveOptions,
}

impl<'a, S: QuizSource + ?Sized> Resolver<'a, S> {
    pub fn new(source: &'a S, options: ResolveOptions) -> Self {
        Self { source, options }
    }

    /// Resolves `quiz_id`. Existence of the top-level quiz is the caller's check.
    pub fn resolve(&self, quiz_id: &str) -> Result<Vec<RuntimeQuestion>, AppError> {
        let mut resolved = Vec::new();
        self.expand(quiz_id, 0, &mut resolved)?;
        Ok(resolved)
    }

    fn expand(
        &self,
        quiz_id: &str,
        depth: usize,
        out: &mut Vec<RuntimeQuestion>,
    ) -> Result<(), AppError> {
        if depth > self.options.max_depth {
            tracing::warn!(
                quiz_id,
                depth,
                max_depth = self.options.max_depth,
                "Max recursion depth reached, truncating branch"
            );
            return Ok(());
        }

        for item in self.source.items_for(quiz_id) {
            match item.item_type {
                QuizItemType::Question => match self.source.question(&item.target_id) {
                    Some(question) => out.push(RuntimeQuestion::new(question.clone(), quiz_id)),
                    None => self.dangling(item)?,
                },
                QuizItemType::QuizRef => {
                    if !self.source.has_quiz(&item.target_id) {
                        self.dangling(item)?;
                    }
                    // A missing quiz normally has no items, so this adds nothing.
                    self.expand(&item.target_id, depth + 1, out)?;
                }
            }
        }

        Ok(())
    }

    fn dangling(&self, item: &QuizItem) -> Result<(), AppError> {
        match self.options.on_dangling {
            DanglingPolicy::Skip => {
                tracing::debug!(
                    item_id = %item.id,
                    quiz_id = %item.quiz_id,
                    target_id = %item.target_id,
                    "Skipping dangling quiz item"
                );
                Ok(())
            }
            DanglingPolicy::Fail => Err(AppError::DanglingReference(format!(
                "Quiz '{}' item '{}' references missing {} '{}'",
                item.quiz_id,
                item.id,
                match item.item_type {
                    QuizItemType::Question => "question",
                    QuizItemType::QuizRef => "quiz",
                },
                item.target_id
            ))),
        }
    }
}

/// Convenience wrapper around [`Resolver::resolve`].
pub fn resolve<S: QuizSource + ?Sized>(
    source: &S,
    quiz_id: &str,
    options: ResolveOptions,
) -> Result<Vec<RuntimeQuestion>, AppError> {
    Resolver::new(source, options).resolve(quiz_id)
}

/// Sum of points over a resolved sequence.
pub fn total_points(questions: &[RuntimeQuestion]) -> u64 {
    questions.iter().map(|q| u64::from(q.question.points)).sum()
}
