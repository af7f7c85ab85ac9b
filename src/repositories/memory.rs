// src/repositories/memory.rs

//! In-process store for unit and router tests.
//!
//! Writes made through a [`SubmissionTx`] are staged on the handle and only
//! copied into the shared tables on commit.

use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;

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

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    quizzes: Vec<Quiz>,
    questions: Vec<Question>,
    answers: Vec<UserAnswer>,
    progress: Vec<Progress>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    fail_progress_insert: Arc<AtomicBool>,
    fail_question_load: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Makes every later `insert_progress` fail like a violated constraint.
    pub fn fail_progress_insert(&self, fail: bool) {
        self.fail_progress_insert.store(fail, Ordering::SeqCst);
    }

    /// Makes `find_questions_by_quiz` fail like a dropped connection.
    pub fn fail_question_load(&self, fail: bool) {
        self.fail_question_load.store(fail, Ordering::SeqCst);
    }

    pub fn seed_user(&self, email: &str) -> User {
        let mut t = self.tables();
        let user = User {
            id: t.next_id(),
            email: email.to_string(),
            full_name: None,
            password: String::new(),
            created_at: Utc::now(),
        };
        t.users.push(user.clone());
        user
    }

    pub fn seed_quiz(&self, title: &str) -> Quiz {
        let mut t = self.tables();
        let quiz = Quiz {
            id: t.next_id(),
            title: title.to_string(),
            subject: "General".to_string(),
            grade: "5".to_string(),
            description: None,
            total_questions: 0,
            created_at: Utc::now(),
        };
        t.quizzes.push(quiz.clone());
        quiz
    }

    pub fn seed_question(&self, quiz_id: i64, text: &str, correct_answer: &str) -> Question {
        let mut t = self.tables();
        let question = Question {
            id: t.next_id(),
            quiz_id,
            question_text: text.to_string(),
            option_a: None,
            option_b: None,
            option_c: None,
            option_d: None,
            correct_answer: correct_answer.to_string(),
            created_at: Utc::now(),
        };
        t.questions.push(question.clone());
        question
    }

    pub fn answers(&self) -> Vec<UserAnswer> {
        self.tables().answers.clone()
    }

    pub fn progress(&self) -> Vec<Progress> {
        self.tables().progress.clone()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.id == id.0).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        let row = User {
            id: t.next_id(),
            email: user.email,
            full_name: user.full_name,
            password: user.password,
            created_at: Utc::now(),
        };
        t.users.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn create_quiz(&self, quiz: CreateQuizRequest) -> Result<Quiz, AppError> {
        let mut t = self.tables();
        let row = Quiz {
            id: t.next_id(),
            title: quiz.title,
            subject: quiz.subject,
            grade: quiz.grade,
            description: quiz.description,
            total_questions: quiz.total_questions,
            created_at: Utc::now(),
        };
        t.quizzes.push(row.clone());
        Ok(row)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        Ok(self.tables().quizzes.clone())
    }

    async fn find_quiz(&self, id: i64) -> Result<Option<Quiz>, AppError> {
        Ok(self.tables().quizzes.iter().find(|q| q.id == id).cloned())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn find_questions_by_quiz(&self, quiz_id: i64) -> Result<Vec<Question>, AppError> {
        if self.fail_question_load.load(Ordering::SeqCst) {
            return Err(AppError::InternalServerError(
                "connection reset by peer".to_string(),
            ));
        }
        Ok(self
            .tables()
            .questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect())
    }

    async fn create_question(
        &self,
        question: CreateQuestionRequest,
    ) -> Result<Question, AppError> {
        let mut t = self.tables();
        if !t.quizzes.iter().any(|q| q.id == question.quiz_id) {
            return Err(AppError::NotFound(format!(
                "Quiz {} not found",
                question.quiz_id
            )));
        }
        let row = Question {
            id: t.next_id(),
            quiz_id: question.quiz_id,
            question_text: question.question_text,
            option_a: question.option_a,
            option_b: question.option_b,
            option_c: question.option_c,
            option_d: question.option_d,
            correct_answer: question.correct_answer,
            created_at: Utc::now(),
        };
        t.questions.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn SubmissionTx>, AppError> {
        Ok(Box::new(MemorySubmissionTx {
            store: self.clone(),
            answers: Vec::new(),
            progress: Vec::new(),
        }))
    }
}

struct MemorySubmissionTx {
    store: MemoryStore,
    answers: Vec<UserAnswer>,
    progress: Vec<Progress>,
}

#[async_trait]
impl SubmissionTx for MemorySubmissionTx {
    async fn insert_answer(&mut self, answer: NewUserAnswer) -> Result<UserAnswer, AppError> {
        let row = UserAnswer {
            id: self.store.tables().next_id(),
            user_id: answer.user_id,
            quiz_id: answer.quiz_id,
            question_id: answer.question_id,
            user_answer: answer.user_answer,
            is_correct: answer.is_correct,
            created_at: Utc::now(),
        };
        self.answers.push(row.clone());
        Ok(row)
    }

    async fn insert_progress(&mut self, progress: NewProgress) -> Result<Progress, AppError> {
        if self.store.fail_progress_insert.load(Ordering::SeqCst) {
            return Err(AppError::InternalServerError(
                "violates check constraint \"progress_score_check\"".to_string(),
            ));
        }
        let row = Progress {
            id: self.store.tables().next_id(),
            user_id: progress.user_id,
            quiz_id: progress.quiz_id,
            total_questions: progress.total_questions,
            correct_answers: progress.correct_answers,
            wrong_answers: progress.wrong_answers,
            score: progress.score,
            completed_at: Utc::now(),
        };
        self.progress.push(row.clone());
        Ok(row)
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let tx = *self;
        let mut t = tx.store.tables();
        t.answers.extend(tx.answers);
        t.progress.extend(tx.progress);
        Ok(())
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<Progress>, AppError> {
        let mut rows: Vec<Progress> = self
            .tables()
            .progress
            .iter()
            .filter(|p| p.user_id == user_id.0)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn list_progress_for_quiz(
        &self,
        user_id: UserId,
        quiz_id: i64,
    ) -> Result<Vec<Progress>, AppError> {
        let mut rows = self.list_progress(user_id).await?;
        rows.retain(|p| p.quiz_id == quiz_id);
        Ok(rows)
    }
}
