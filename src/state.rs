// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    repositories::{ProgressStore, QuestionStore, QuizStore, SubmissionStore, UserStore},
    services::{identity::IdentityResolver, submission::SubmissionCoordinator},
    utils::jwt::TokenCodec,
};

#[derive(Clone)]
pub struct AppState {
    pub tokens: TokenCodec,
    pub users: Arc<dyn UserStore>,
    pub quizzes: Arc<dyn QuizStore>,
    pub questions: Arc<dyn QuestionStore>,
    pub progress: Arc<dyn ProgressStore>,
    pub identity: IdentityResolver,
    pub submissions: SubmissionCoordinator,
}

impl AppState {
    /// Wires every collaborator to one store implementation.
    pub fn new<S>(store: Arc<S>, config: &Config) -> Self
    where
        S: UserStore + QuizStore + QuestionStore + SubmissionStore + ProgressStore + 'static,
    {
        let tokens = TokenCodec::new(config);
        let users: Arc<dyn UserStore> = store.clone();
        let questions: Arc<dyn QuestionStore> = store.clone();
        let submission_store: Arc<dyn SubmissionStore> = store.clone();

        let identity = IdentityResolver::new(tokens.clone(), users.clone());
        let submissions =
            SubmissionCoordinator::new(identity.clone(), questions.clone(), submission_store);

        Self {
            tokens,
            users,
            quizzes: store.clone(),
            questions,
            progress: store,
            identity,
            submissions,
        }
    }
}

impl FromRef<AppState> for IdentityResolver {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}

impl FromRef<AppState> for SubmissionCoordinator {
    fn from_ref(state: &AppState) -> Self {
        state.submissions.clone()
    }
}
