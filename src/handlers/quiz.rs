// src/handlers/quiz.rs

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    extract::{AppPath, ValidJson},
    models::{
        progress::QuizSubmission,
        question::{CreateQuestionRequest, PublicQuestion},
        quiz::{CreateQuizRequest, QuizWithQuestions},
    },
    services::{identity::authorization_header, submission::SubmissionCoordinator},
    state::AppState,
    utils::html::{clean_html, clean_optional},
};

/// Creates a quiz. Returns 201 Created and the stored quiz.
pub async fn create_quiz(
    State(state): State<AppState>,
    ValidJson(mut payload): ValidJson<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.title = clean_html(&payload.title);
    payload.subject = clean_html(&payload.subject);
    payload.grade = clean_html(&payload.grade);
    payload.description = clean_optional(payload.description.as_deref());

    let quiz = state.quizzes.create_quiz(payload).await?;
    tracing::info!(quiz_id = quiz.id, "Created quiz");

    Ok((StatusCode::CREATED, Json(quiz)))
}

/// Lists every quiz.
pub async fn list_quizzes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let quizzes = state.quizzes.list_quizzes().await?;
    Ok(Json(quizzes))
}

/// Retrieves a quiz with all of its questions. Correct answers are not sent.
pub async fn get_quiz(
    State(state): State<AppState>,
    AppPath(quiz_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = state
        .quizzes
        .find_quiz(quiz_id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let questions = state
        .questions
        .find_questions_by_quiz(quiz_id)
        .await?
        .into_iter()
        .map(PublicQuestion::from)
        .collect();

    Ok(Json(QuizWithQuestions { quiz, questions }))
}

/// Adds a question to an existing quiz. Returns 201 Created and the stored question.
pub async fn add_question(
    State(state): State<AppState>,
    ValidJson(mut payload): ValidJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.question_text = clean_html(&payload.question_text);
    payload.option_a = clean_optional(payload.option_a.as_deref());
    payload.option_b = clean_optional(payload.option_b.as_deref());
    payload.option_c = clean_optional(payload.option_c.as_deref());
    payload.option_d = clean_optional(payload.option_d.as_deref());

    let question = state.questions.create_question(payload).await?;
    tracing::info!(
        quiz_id = question.quiz_id,
        question_id = question.id,
        "Added question"
    );

    Ok((StatusCode::CREATED, Json(question)))
}

/// Grades a submission and records it in the caller's progress history.
///
/// Accepts `Authorization: <token>` as well as `Authorization: Bearer <token>`.
pub async fn submit_quiz(
    State(coordinator): State<SubmissionCoordinator>,
    AppPath(quiz_id): AppPath<i64>,
    headers: HeaderMap,
    ValidJson(submission): ValidJson<QuizSubmission>,
) -> Result<impl IntoResponse, AppError> {
    let raw = authorization_header(&headers)?;
    let receipt = coordinator.submit(quiz_id, raw, &submission).await?;

    Ok(Json(receipt))
}
