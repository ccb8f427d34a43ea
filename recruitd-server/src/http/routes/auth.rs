//! Authentication endpoints

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    routing::{get, post},
    Json, Router,
};

use crate::auth::Session;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::response::{ok, Envelope};
use crate::models::{Credentials, User};
use crate::state::AppState;

/// GET /api/v1/auth/currentUser - `data` is null without an Authorization header
async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Envelope<Option<User>>>, ApiError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .map(|v| {
            v.to_str().map_err(|_| ApiError::BadRequest {
                message: "Please provide a bearer token.".to_string(),
            })
        })
        .transpose()?;

    let user = state.auth().current_user(authorization).await?;
    Ok(ok(user))
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Json<Envelope<Session>>, ApiError> {
    Ok(ok(state.auth().login(credentials).await?))
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Json<Envelope<Session>>, ApiError> {
    Ok(ok(state.auth().register(credentials).await?))
}

/// Auth routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/currentUser", get(current_user))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register))
}
