//! Exercise set contract, quiz scoring and writing checks.

use serde::{Deserialize, Serialize};

use crate::contract::Contract;

/// Number of options every quiz question must offer.
pub const QUIZ_OPTIONS: usize = 4;

/// A step-by-step exercise the learner follows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuidedExercise {
    pub title: String,
    pub steps: Vec<String>,
}

/// A multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizQuestion {
    #[serde(rename = "q")]
    pub question: String,
    #[serde(rename = "opts")]
    pub options: Vec<String>,
    /// Zero-based index of the correct option
    #[serde(rename = "a")]
    pub answer: usize,
    #[serde(rename = "why", default)]
    pub explanation: String,
}

/// A short written summary with a word-count window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WritingTask {
    pub prompt: String,
    pub min: usize,
    pub max: usize,
    #[serde(default)]
    pub rubric: Vec<String>,
}

/// Outcome of checking a piece of writing against its word window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCountCheck {
    TooShort { words: usize, min: usize },
    WithinRange { words: usize },
    TooLong { words: usize, max: usize },
}

impl WordCountCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, WordCountCheck::WithinRange { .. })
    }
}

impl WritingTask {
    pub fn check(&self, text: &str) -> WordCountCheck {
        let words = text.split_whitespace().count();
        if words < self.min {
            WordCountCheck::TooShort {
                words,
                min: self.min,
            }
        } else if words > self.max {
            WordCountCheck::TooLong {
                words,
                max: self.max,
            }
        } else {
            WordCountCheck::WithinRange { words }
        }
    }
}

/// Result of scoring a set of quiz answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

/// Guided exercise, quiz and writing task for one step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseSet {
    pub guided: GuidedExercise,
    pub quiz: Vec<QuizQuestion>,
    pub writing: WritingTask,
}

impl ExerciseSet {
    /// Scores answers given as zero-based option indices.
    ///
    /// Missing answers count as wrong; extra answers are ignored.
    pub fn score(&self, answers: &[usize]) -> QuizScore {
        let correct = self
            .quiz
            .iter()
            .zip(answers)
            .filter(|(question, given)| question.answer == **given)
            .count();
        QuizScore {
            correct,
            total: self.quiz.len(),
        }
    }
}

impl Contract for ExerciseSet {
    const NAME: &'static str = "exercise set";

    fn validate(&self) -> std::result::Result<(), String> {
        if self.guided.steps.is_empty() {
            return Err("guided exercise needs at least one step".to_string());
        }
        if self.quiz.is_empty() {
            return Err("quiz needs at least one question".to_string());
        }
        for (i, question) in self.quiz.iter().enumerate() {
            if question.options.len() != QUIZ_OPTIONS {
                return Err(format!(
                    "question {i} has {} options, expected {QUIZ_OPTIONS}",
                    question.options.len()
                ));
            }
            if question.answer >= QUIZ_OPTIONS {
                return Err(format!("question {i} answer {} is out of range", question.answer));
            }
        }
        if self.writing.min > self.writing.max {
            return Err(format!(
                "writing window {}..{} is inverted",
                self.writing.min, self.writing.max
            ));
        }
        Ok(())
    }
}
