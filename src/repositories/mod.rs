// src/repositories/mod.rs

//! Storage collaborators. Services only ever see these traits; the
//! Postgres implementation lives in [`pg`].

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        progress::{NewProgress, NewUserAnswer, Progress, UserAnswer},
        question::{CreateQuestionRequest, Question},
        quiz::{CreateQuizRequest, Quiz},
        user::{NewUser, User, UserId},
    },
};

#[cfg(test)]
pub mod memory;
pub mod pg;

pub use pg::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;
    /// Fails with `Conflict` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;
}

#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn create_quiz(&self, quiz: CreateQuizRequest) -> Result<Quiz, AppError>;
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError>;
    async fn find_quiz(&self, id: i64) -> Result<Option<Quiz>, AppError>;
}

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// All questions of a quiz, ordered by id. Unknown quiz ids give an empty list.
    async fn find_questions_by_quiz(&self, quiz_id: i64) -> Result<Vec<Question>, AppError>;
    /// Fails with `NotFound` when the owning quiz does not exist.
    async fn create_question(&self, question: CreateQuestionRequest)
    -> Result<Question, AppError>;
}

/// Opens the write transaction of a submission event.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn SubmissionTx>, AppError>;
}

/// Writes staged inside one transaction.
///
/// Nothing is visible to readers until [`SubmissionTx::commit`] succeeds.
/// Dropping the handle without committing rolls everything back.
#[async_trait]
pub trait SubmissionTx: Send {
    async fn insert_answer(&mut self, answer: NewUserAnswer) -> Result<UserAnswer, AppError>;
    async fn insert_progress(&mut self, progress: NewProgress) -> Result<Progress, AppError>;
    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Newest first.
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<Progress>, AppError>;
    /// Newest first.
    async fn list_progress_for_quiz(
        &self,
        user_id: UserId,
        quiz_id: i64,
    ) -> Result<Vec<Progress>, AppError>;
}
