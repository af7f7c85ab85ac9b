// src/services/submission.rs

use std::sync::Arc;

use crate::{
    error::AppError,
    models::progress::{NewProgress, NewUserAnswer, QuizSubmission, SubmissionReceipt},
    repositories::{QuestionStore, SubmissionStore},
    services::{grading, identity::IdentityResolver},
};

/// Runs one submission event: identify, grade, record.
#[derive(Clone)]
pub struct SubmissionCoordinator {
    identity: IdentityResolver,
    questions: Arc<dyn QuestionStore>,
    submissions: Arc<dyn SubmissionStore>,
}

impl SubmissionCoordinator {
    pub fn new(
        identity: IdentityResolver,
        questions: Arc<dyn QuestionStore>,
        submissions: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            identity,
            questions,
            submissions,
        }
    }

    /// Grades `submission` for the caller identified by `raw_auth_header`.
    ///
    /// * Identity and question loading happen before any write.
    /// * The quiz itself is not looked up: an unknown or empty quiz grades to zero.
    /// * All answer rows and the progress row commit together or not at all.
    pub async fn submit(
        &self,
        quiz_id: i64,
        raw_auth_header: Option<&str>,
        submission: &QuizSubmission,
    ) -> Result<SubmissionReceipt, AppError> {
        let user_id = self.identity.resolve(raw_auth_header).await?;

        let questions = self.questions.find_questions_by_quiz(quiz_id).await?;

        let result = grading::grade(&questions, &submission.answers);
        let total = result.total();
        let score = result.score();

        let mut tx = self.submissions.begin().await?;

        for graded in result.per_question {
            tx.insert_answer(NewUserAnswer {
                user_id: user_id.0,
                quiz_id,
                question_id: graded.question_id,
                user_answer: graded.submitted,
                is_correct: graded.is_correct,
            })
            .await?;
        }

        let progress = tx
            .insert_progress(NewProgress {
                user_id: user_id.0,
                quiz_id,
                total_questions: total,
                correct_answers: result.correct_count,
                wrong_answers: result.wrong_count,
                score,
            })
            .await?;

        tx.commit().await?;

        tracing::info!(
            user_id = user_id.0,
            quiz_id,
            progress_id = progress.id,
            score,
            "Recorded quiz submission"
        );

        Ok(SubmissionReceipt {
            score,
            correct: result.correct_count,
            wrong: result.wrong_count,
            total,
            message: format!("Quiz submitted! Score: {:.2}%", score),
        })
    }
}
