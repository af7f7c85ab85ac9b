// src/routes.rs

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, progress, quiz},
    services::identity::auth_middleware,
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, quiz, progress).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        // Protected auth routes
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    // Submit resolves the caller itself, so it sits outside the middleware.
    let quiz_routes = Router::new()
        .route("/create", post(quiz::create_quiz))
        .route("/all", get(quiz::list_quizzes))
        .route("/add-question", post(quiz::add_question))
        .route("/submit/{quiz_id}", post(quiz::submit_quiz))
        .route("/{quiz_id}", get(quiz::get_quiz));

    let progress_routes = Router::new()
        .route("/all", get(progress::list_progress))
        .route("/quiz/{quiz_id}", get(progress::quiz_progress))
        .route("/stats", get(progress::stats))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/progress", progress_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
