// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    state::AppState,
    utils::{hash::verify_secret, jwt::sign_admin_token},
};

/// DTO for the admin gate.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Checks the shared admin secret and returns a JWT token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if !verify_secret(&payload.password, &state.admin_secret_hash)? {
        tracing::warn!("Rejected admin login attempt");
        return Err(AppError::AuthError("Invalid credentials".to_string()));
    }

    let token = sign_admin_token(&state.config.jwt_secret, state.config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
    })))
}
