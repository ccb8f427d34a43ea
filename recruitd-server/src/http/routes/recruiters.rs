//! Recruiter endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use uuid::Uuid;

use crate::db::{QueryOptions, Store, ValueMap};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidUuid};
use crate::http::response::{ok, Envelope, Message};
use crate::models::recruiter::{self, Recruiter, RecruiterInput};
use crate::models::ValidationError;
use crate::state::AppState;

fn by_id(id: Uuid) -> ValueMap {
    ValueMap::new().with("id", id)
}

async fn fetch_one(store: &Store, id: Uuid) -> Result<Recruiter, ApiError> {
    let record = store
        .find_one(recruiter::TABLE, &by_id(id), &QueryOptions::new())
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "recruiter",
            id: id.to_string(),
        })?;
    Ok(Recruiter::from_record(&record)?)
}

/// GET /api/v1/recruiters
async fn list_recruiters(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Recruiter>>>, ApiError> {
    let records = state
        .store()
        .find_all(recruiter::TABLE, &ValueMap::new(), &QueryOptions::new())
        .await?;
    let recruiters = records
        .iter()
        .map(Recruiter::from_record)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ok(recruiters))
}

/// GET /api/v1/recruiters/{id}
async fn get_recruiter(
    State(state): State<AppState>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Envelope<Recruiter>>, ApiError> {
    Ok(ok(fetch_one(state.store(), id).await?))
}

/// POST /api/v1/recruiters
async fn add_recruiter(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RecruiterInput>,
) -> Result<(StatusCode, Json<Envelope<Recruiter>>), ApiError> {
    input.validate()?;

    let recruiter = input.into_recruiter(Uuid::new_v4());
    state
        .store()
        .create(recruiter::TABLE, &recruiter.to_values())
        .await?;
    tracing::info!(id = %recruiter.id, "recruiter created");

    Ok((StatusCode::CREATED, ok(recruiter)))
}

/// PUT /api/v1/recruiters/{id} - only the fields present in the body change
async fn update_recruiter(
    State(state): State<AppState>,
    ValidUuid(id): ValidUuid,
    JsonBody(input): JsonBody<RecruiterInput>,
) -> Result<Json<Envelope<Recruiter>>, ApiError> {
    input.validate()?;
    if input.is_empty() {
        return Err(ValidationError::NoData.into());
    }

    state
        .store()
        .update(recruiter::TABLE, &by_id(id), &input.changes())
        .await?;

    Ok(ok(fetch_one(state.store(), id).await?))
}

/// DELETE /api/v1/recruiters/{id}
async fn delete_recruiter(
    State(state): State<AppState>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Envelope<Message>>, ApiError> {
    state.store().destroy(recruiter::TABLE, &by_id(id)).await?;

    Ok(ok(Message {
        message: "Recruiter deleted",
    }))
}

/// Recruiter routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/recruiters",
            get(list_recruiters).post(add_recruiter),
        )
        .route(
            "/api/v1/recruiters/{id}",
            get(get_recruiter)
                .put(update_recruiter)
                .delete(delete_recruiter),
        )
}
