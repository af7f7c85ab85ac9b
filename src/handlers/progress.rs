// src/handlers/progress.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    extract::AppPath,
    services::{identity::CurrentUser, progress},
    state::AppState,
};

/// Every recorded attempt of the caller, newest first.
pub async fn list_progress(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let history = state.progress.list_progress(user_id).await?;
    Ok(Json(history))
}

/// The caller's attempts at one quiz, newest first.
pub async fn quiz_progress(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    AppPath(quiz_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let history = state
        .progress
        .list_progress_for_quiz(user_id, quiz_id)
        .await?;
    Ok(Json(history))
}

/// Aggregate numbers over the caller's whole history.
pub async fn stats(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let history = state.progress.list_progress(user_id).await?;
    Ok(Json(progress::summarize(&history)))
}
