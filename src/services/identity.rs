// src/services/identity.rs

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, AuthError},
    models::user::UserId,
    repositories::UserStore,
    utils::jwt::TokenCodec,
};

/// Pulls the candidate token out of an Authorization header value.
///
/// The token is the last whitespace-separated segment, so both
/// `"<token>"` and `"Bearer <token>"` work and the scheme is not checked.
pub fn extract_token(raw_header: Option<&str>) -> Result<&str, AuthError> {
    let raw = match raw_header {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(AuthError::MissingAuth),
    };

    raw.split_whitespace().last().ok_or(AuthError::InvalidAuth)
}

/// Reads the Authorization header. A value that is not text counts as invalid.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    match headers.get(header::AUTHORIZATION) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| AuthError::InvalidAuth),
    }
}

/// Turns an Authorization header into the id of an existing user.
#[derive(Clone)]
pub struct IdentityResolver {
    tokens: TokenCodec,
    users: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(tokens: TokenCodec, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// Auth failures come back as `AppError::Auth`; a failing user lookup
    /// propagates as the store's own error.
    pub async fn resolve(&self, raw_header: Option<&str>) -> Result<UserId, AppError> {
        let token = extract_token(raw_header)?;

        let email = self.tokens.decode(token).ok_or(AuthError::InvalidAuth)?;

        let user = self
            .users
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user.user_id())
    }
}

/// The authenticated caller, inserted into request extensions by [`auth_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

/// Axum Middleware: Authentication.
///
/// Resolves the Authorization header and injects [`CurrentUser`] for handlers.
/// Any failure ends the request with 401.
pub async fn auth_middleware(
    State(identity): State<IdentityResolver>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Owned copy: the request body is not `Sync`, so no borrow of `req` may live across the await.
    let raw = authorization_header(req.headers())?.map(str::to_owned);
    let user_id = identity.resolve(raw.as_deref()).await?;

    req.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(req).await)
}
