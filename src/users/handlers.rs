use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    error::AppError,
    state::AppState,
    users::{dto::login_message, repo_types::Credentials},
};

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Acknowledges a login. Credentials are not checked against storage.
#[instrument(skip(payload))]
pub async fn login(
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<String>, AppError> {
    let Json(creds) = payload.map_err(|e| {
        warn!(error = %e.body_text(), "rejected login body");
        AppError::BadRequest(e.body_text())
    })?;

    info!(username = %creds.username, "user logged in");
    Ok(Json(login_message(&creds.username)))
}
