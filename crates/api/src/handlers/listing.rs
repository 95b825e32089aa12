//! Handlers for the `/listings/` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use listings_core::error::CoreError;
use listings_core::types::DbId;
use listings_db::models::listing::{CreateListing, ListingSummary};
use listings_db::repositories::ListingRepo;
use serde_json::Value;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::payload::Payload;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Listing",
        id,
    })
}

/// Read `first_name` and `last_name` from a request body.
fn parse_listing(body: &Value) -> AppResult<CreateListing> {
    let mut payload = Payload::from_value(body)?;
    let first_name = payload.text("first_name");
    let last_name = payload.text("last_name");

    let input = CreateListing {
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
    };
    payload.absorb(input.validate());
    payload.finish()?;

    Ok(input)
}

async fn load_summary(state: &AppState, id: DbId) -> AppResult<ListingSummary> {
    ListingRepo::find_summary(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /listings/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ListingSummary>>> {
    let listings = ListingRepo::list_summaries(&state.pool).await?;
    Ok(Json(listings))
}

/// POST /listings/
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ListingSummary>)> {
    let Json(body) = body?;
    let input = parse_listing(&body)?;

    let listing = ListingRepo::create(&state.pool, &input).await?;
    tracing::info!(listing_id = listing.id, "Listing created");

    let summary = load_summary(&state, listing.id).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /listings/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ListingSummary>> {
    Ok(Json(load_summary(&state, id).await?))
}

/// PUT /listings/{id}/
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ListingSummary>> {
    let Json(body) = body?;
    let input = parse_listing(&body)?;

    ListingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(listing_id = id, "Listing updated");

    Ok(Json(load_summary(&state, id).await?))
}

/// DELETE /listings/{id}/
///
/// Pets and assignments of the listing are removed with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ListingRepo::delete(&state.pool, id).await? {
        tracing::info!(listing_id = id, "Listing deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
