// src/services/progress.rs

use std::collections::HashSet;

use crate::models::progress::{Progress, ProgressStats};

/// Summarizes a user's submission history.
pub fn summarize(history: &[Progress]) -> ProgressStats {
    if history.is_empty() {
        return ProgressStats {
            total_attempts: 0,
            quizzes_attempted: 0,
            average_score: 0.0,
            best_score: 0.0,
            total_correct: 0,
            total_wrong: 0,
        };
    }

    let quizzes: HashSet<i64> = history.iter().map(|p| p.quiz_id).collect();
    let score_sum: f64 = history.iter().map(|p| p.score).sum();
    let best_score = history.iter().map(|p| p.score).fold(0.0, f64::max);

    ProgressStats {
        total_attempts: history.len(),
        quizzes_attempted: quizzes.len(),
        average_score: score_sum / history.len() as f64,
        best_score,
        total_correct: history.iter().map(|p| p.correct_answers as i64).sum(),
        total_wrong: history.iter().map(|p| p.wrong_answers as i64).sum(),
    }
}
