// src/services/grading.rs

use std::collections::HashMap;

use crate::models::question::Question;

/// Outcome for one answered question.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedAnswer {
    pub question_id: i64,
    pub submitted: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GradingResult {
    pub per_question: Vec<GradedAnswer>,
    pub correct_count: i32,
    pub wrong_count: i32,
}

impl GradingResult {
    /// Number of questions that were actually answered.
    pub fn total(&self) -> i32 {
        self.correct_count + self.wrong_count
    }

    /// Percentage of answered questions that were correct, 0 when nothing was answered.
    pub fn score(&self) -> f64 {
        score_percentage(self.correct_count, self.total())
    }
}

pub fn score_percentage(correct: i32, total: i32) -> f64 {
    if total > 0 {
        correct as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Case-insensitive, otherwise exact. Whitespace is significant.
fn answer_matches(submitted: &str, correct: &str) -> bool {
    submitted.to_lowercase() == correct.to_lowercase()
}

/// Grades `answers` (keyed by question id as a string) against `questions`.
///
/// Questions without an entry in `answers` are skipped: they count as
/// neither right nor wrong and produce no record. Keys that match no
/// question are ignored.
pub fn grade(questions: &[Question], answers: &HashMap<String, String>) -> GradingResult {
    let mut result = GradingResult::default();

    for question in questions {
        let Some(submitted) = answers.get(&question.id.to_string()) else {
            continue;
        };

        let is_correct = answer_matches(submitted, &question.correct_answer);
        if is_correct {
            result.correct_count += 1;
        } else {
            result.wrong_count += 1;
        }

        result.per_question.push(GradedAnswer {
            question_id: question.id,
            submitted: submitted.clone(),
            is_correct,
        });
    }

    tracing::debug!(
        questions = questions.len(),
        answered = result.total(),
        correct = result.correct_count,
        "Graded submission"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, correct_answer: &str) -> Question {
        Question {
            id,
            quiz_id: 1,
            question_text: format!("Question {}", id),
            option_a: None,
            option_b: None,
            option_c: None,
            option_d: None,
            correct_answer: correct_answer.to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    fn answers(pairs: &[(i64, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(id, a)| (id.to_string(), a.to_string()))
            .collect()
    }

    #[test]
    fn test_case_insensitive_match() {
        let result = grade(&[question(1, "Paris")], &answers(&[(1, "paris")]));
        assert_eq!(result.correct_count, 1);
        assert!(result.per_question[0].is_correct);

        let result = grade(&[question(1, "straße")], &answers(&[(1, "STRASSE")]));
        assert_eq!(result.correct_count, 0, "no folding beyond lowercasing");
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        let result = grade(&[question(1, "Paris")], &answers(&[(1, " Paris")]));
        assert_eq!(result.correct_count, 0);
        assert_eq!(result.wrong_count, 1);
    }

    #[test]
    fn test_unanswered_questions_are_skipped() {
        let questions = [question(1, "A"), question(2, "B"), question(3, "C")];
        let result = grade(&questions, &answers(&[(1, "A"), (3, "x")]));

        assert_eq!(result.total(), 2);
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.wrong_count, 1);
        let graded: Vec<i64> = result.per_question.iter().map(|g| g.question_id).collect();
        assert_eq!(graded, vec![1, 3]);
        assert_eq!(result.score(), 50.0);
    }

    #[test]
    fn test_foreign_keys_are_ignored() {
        let result = grade(&[question(1, "A")], &answers(&[(1, "A"), (99, "A")]));
        assert_eq!(result.total(), 1);
        assert_eq!(result.per_question.len(), 1);
    }

    #[test]
    fn test_score_formula() {
        let questions = [
            question(1, "A"),
            question(2, "B"),
            question(3, "C"),
            question(4, "D"),
        ];
        let result = grade(
            &questions,
            &answers(&[(1, "a"), (2, "b"), (3, "c"), (4, "x")]),
        );
        assert_eq!(result.correct_count, 3);
        assert_eq!(result.score(), 75.0);
    }

    #[test]
    fn test_empty_quiz_scores_zero() {
        let result = grade(&[], &answers(&[(1, "A")]));
        assert_eq!(result, GradingResult::default());
        assert_eq!(result.score(), 0.0);
    }

    #[test]
    fn test_grading_is_repeatable() {
        let questions = [question(1, "A"), question(2, "B")];
        let submitted = answers(&[(1, "A"), (2, "C")]);
        assert_eq!(grade(&questions, &submitted), grade(&questions, &submitted));
    }
}
