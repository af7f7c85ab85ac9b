// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    error::AppError,
    extract::{QueryOrJson, ValidJson},
    models::user::{LoginRequest, NewUser, SignupRequest, TokenResponse},
    services::identity::CurrentUser,
    state::AppState,
    utils::hash::{hash_password, verify_password},
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (excluding password).
pub async fn signup(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let password = hash_password(&payload.password)?;

    let user = state
        .users
        .create_user(NewUser {
            email: payload.email,
            full_name: payload.full_name,
            password,
        })
        .await?;

    tracing::info!(user_id = user.id, "Registered user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and returns an access token whose subject is the email.
///
/// Credentials come from `?email=..&password=..` or a JSON body.
/// Unknown email and wrong password get the same answer.
pub async fn login(
    State(state): State<AppState>,
    QueryOrJson(payload): QueryOrJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let rejected = || AppError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .users
        .find_user_by_email(&payload.email)
        .await?
        .ok_or_else(rejected)?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(rejected());
    }

    let access_token = state.tokens.encode(&user.email, None)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Returns the authenticated user.
pub async fn me(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .find_user_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
