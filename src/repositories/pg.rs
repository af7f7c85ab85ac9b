// src/repositories/pg.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    error::AppError,
    models::{
        progress::{NewProgress, NewUserAnswer, Progress, UserAnswer},
        question::{CreateQuestionRequest, Question},
        quiz::{CreateQuizRequest, Quiz},
        user::{NewUser, User, UserId},
    },
    repositories::{
        ProgressStore, QuestionStore, QuizStore, SubmissionStore, SubmissionTx, UserStore,
    },
};

const QUESTION_COLUMNS: &str = "id, quiz_id, question_text, option_a, option_b, option_c, \
     option_d, correct_answer, created_at";

const PROGRESS_COLUMNS: &str = "id, user_id, quiz_id, total_questions, correct_answers, \
     wrong_answers, score, completed_at";

/// Every store backed by one Postgres pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, full_name, password, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, full_name, password, created_at FROM users WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, full_name, password)
            VALUES ($1, $2, $3)
            RETURNING id, email, full_name, password, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Email '{}' is already registered", user.email))
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::from(e)
            }
        })
    }
}

#[async_trait]
impl QuizStore for PgStore {
    async fn create_quiz(&self, quiz: CreateQuizRequest) -> Result<Quiz, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (title, subject, grade, description, total_questions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, subject, grade, description, total_questions, created_at
            "#,
        )
        .bind(&quiz.title)
        .bind(&quiz.subject)
        .bind(&quiz.grade)
        .bind(&quiz.description)
        .bind(quiz.total_questions)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create quiz: {:?}", e);
            AppError::from(e)
        })?;

        Ok(quiz)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            "SELECT id, title, subject, grade, description, total_questions, created_at \
             FROM quizzes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    async fn find_quiz(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(
            "SELECT id, title, subject, grade, description, total_questions, created_at \
             FROM quizzes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz)
    }
}

#[async_trait]
impl QuestionStore for PgStore {
    async fn find_questions_by_quiz(&self, quiz_id: i64) -> Result<Vec<Question>, AppError> {
        let sql = format!(
            "SELECT {} FROM questions WHERE quiz_id = $1 ORDER BY id",
            QUESTION_COLUMNS
        );
        let questions = sqlx::query_as::<_, Question>(&sql)
            .bind(quiz_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch questions for quiz {}: {:?}", quiz_id, e);
                AppError::from(e)
            })?;

        Ok(questions)
    }

    async fn create_question(
        &self,
        question: CreateQuestionRequest,
    ) -> Result<Question, AppError> {
        let sql = format!(
            r#"
            INSERT INTO questions
                (quiz_id, question_text, option_a, option_b, option_c, option_d, correct_answer)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            QUESTION_COLUMNS
        );
        sqlx::query_as::<_, Question>(&sql)
            .bind(question.quiz_id)
            .bind(&question.question_text)
            .bind(&question.option_a)
            .bind(&question.option_b)
            .bind(&question.option_c)
            .bind(&question.option_d)
            .bind(&question.correct_answer)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::NotFound(format!("Quiz {} not found", question.quiz_id))
                } else {
                    tracing::error!("Failed to create question: {:?}", e);
                    AppError::from(e)
                }
            })
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn begin(&self) -> Result<Box<dyn SubmissionTx>, AppError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSubmissionTx { tx }))
    }
}

/// Wraps a live Postgres transaction. sqlx rolls it back on drop.
struct PgSubmissionTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SubmissionTx for PgSubmissionTx {
    async fn insert_answer(&mut self, answer: NewUserAnswer) -> Result<UserAnswer, AppError> {
        let row = sqlx::query_as::<_, UserAnswer>(
            r#"
            INSERT INTO user_answers (user_id, quiz_id, question_id, user_answer, is_correct)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, quiz_id, question_id, user_answer, is_correct, created_at
            "#,
        )
        .bind(answer.user_id)
        .bind(answer.quiz_id)
        .bind(answer.question_id)
        .bind(&answer.user_answer)
        .bind(answer.is_correct)
        .fetch_one(&mut *self.tx)
        .await?;

        Ok(row)
    }

    async fn insert_progress(&mut self, progress: NewProgress) -> Result<Progress, AppError> {
        let sql = format!(
            r#"
            INSERT INTO progress
                (user_id, quiz_id, total_questions, correct_answers, wrong_answers, score)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PROGRESS_COLUMNS
        );
        let row = sqlx::query_as::<_, Progress>(&sql)
            .bind(progress.user_id)
            .bind(progress.quiz_id)
            .bind(progress.total_questions)
            .bind(progress.correct_answers)
            .bind(progress.wrong_answers)
            .bind(progress.score)
            .fetch_one(&mut *self.tx)
            .await?;

        Ok(row)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for PgStore {
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<Progress>, AppError> {
        let sql = format!(
            "SELECT {} FROM progress WHERE user_id = $1 ORDER BY completed_at DESC, id DESC",
            PROGRESS_COLUMNS
        );
        let rows = sqlx::query_as::<_, Progress>(&sql)
            .bind(user_id.0)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn list_progress_for_quiz(
        &self,
        user_id: UserId,
        quiz_id: i64,
    ) -> Result<Vec<Progress>, AppError> {
        let sql = format!(
            "SELECT {} FROM progress WHERE user_id = $1 AND quiz_id = $2 \
             ORDER BY completed_at DESC, id DESC",
            PROGRESS_COLUMNS
        );
        let rows = sqlx::query_as::<_, Progress>(&sql)
            .bind(user_id.0)
            .bind(quiz_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_foreign_key_violation())
}
