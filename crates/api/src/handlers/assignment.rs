//! Handlers for the `/listings/assignments/` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use listings_core::assignment::{AssignmentCandidate, AssignmentValidator};
use listings_db::models::assignment::{AssignmentView, CreateAssignment};
use listings_db::repositories::{AssignmentRepo, ListingRepo, PgAssignmentLookup};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::payload::{missing_pk, Payload};
use crate::state::AppState;

/// GET /listings/assignments/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<AssignmentView>>> {
    let rows = AssignmentRepo::list(&state.pool).await?;
    Ok(Json(rows.into_iter().map(AssignmentView::from).collect()))
}

/// POST /listings/assignments/
///
/// The listing row is locked for the rest of the transaction, so two
/// requests for the same listing cannot both pass the overlap check.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AssignmentView>)> {
    let Json(body) = body?;
    let mut payload = Payload::from_value(&body)?;

    let start_date = payload.date("start_date");
    let end_date = payload.date("end_date");
    let listing_id = payload.pk("listing");

    let mut tx = state.pool.begin().await?;

    if let Some(id) = listing_id {
        if ListingRepo::find_by_id_for_update(&mut *tx, id)
            .await?
            .is_none()
        {
            payload.reject("listing", missing_pk(id));
        }
    }
    payload.finish()?;

    let validator = AssignmentValidator::new(state.clock.today());
    let candidate = AssignmentCandidate {
        start_date,
        end_date,
        listing_id,
    };
    let candidate = {
        let mut lookup = PgAssignmentLookup::new(&mut *tx);
        validator.validate(&mut lookup, candidate).await?
    };

    let AssignmentCandidate {
        start_date: Some(start_date),
        end_date: Some(end_date),
        listing_id: Some(listing_id),
    } = candidate
    else {
        return Err(AppError::InternalError(
            "validated assignment is missing a field".into(),
        ));
    };

    let input = CreateAssignment {
        listing_id,
        start_date,
        end_date,
    };
    let assignment = AssignmentRepo::create(&mut *tx, &input).await?;
    tx.commit().await?;

    tracing::info!(
        assignment_id = assignment.id,
        listing_id,
        %start_date,
        %end_date,
        "Assignment created"
    );

    Ok((StatusCode::CREATED, Json(assignment.into())))
}
