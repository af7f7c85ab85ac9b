// src/models/progress.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'user_answers' table. One row per graded question per submission.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserAnswer {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub question_id: i64,
    pub user_answer: String,
    pub is_correct: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUserAnswer {
    pub user_id: i64,
    pub quiz_id: i64,
    pub question_id: i64,
    pub user_answer: String,
    pub is_correct: bool,
}

/// Represents the 'progress' table.
/// Append-only: every submission adds a row, retakes never overwrite.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Progress {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    /// Percentage in [0, 100].
    pub score: f64,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProgress {
    pub user_id: i64,
    pub quiz_id: i64,
    pub total_questions: i32,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub score: f64,
}

/// DTO for submitting a quiz attempt.
/// Unknown fields such as a redundant `quiz_id` are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QuizSubmission {
    /// User's answers map.
    /// Key: Question ID as a string (JSON object keys are strings).
    /// Value: the submitted answer text.
    pub answers: HashMap<String, String>,
}

/// Result of one submission event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub score: f64,
    pub correct: i32,
    pub wrong: i32,
    pub total: i32,
    pub message: String,
}

/// Aggregate over a user's whole progress history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_attempts: usize,
    pub quizzes_attempted: usize,
    pub average_score: f64,
    pub best_score: f64,
    pub total_correct: i64,
    pub total_wrong: i64,
}
