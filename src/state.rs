// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, error::AppError, store::QuizStore, utils::hash::hash_secret};

pub type SharedStore = Arc<dyn QuizStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
    /// Argon2 hash of the admin shared secret.
    pub admin_secret_hash: Arc<str>,
}

impl AppState {
    pub fn new(store: SharedStore, config: Config) -> Result<Self, AppError> {
        let admin_secret_hash = hash_secret(&config.admin_password)?.into();
        Ok(Self {
            store,
            config,
            admin_secret_hash,
        })
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
