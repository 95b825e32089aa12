use axum::routing::get;
use axum::Router;

use crate::handlers::{assignment, listing};
use crate::state::AppState;

/// Listing and assignment routes.
///
/// ```text
/// GET    /listings/                -> listing::list
/// POST   /listings/                -> listing::create
/// GET    /listings/assignments/    -> assignment::list
/// POST   /listings/assignments/    -> assignment::create
/// GET    /listings/{id}/           -> listing::get_by_id
/// PUT    /listings/{id}/           -> listing::update
/// DELETE /listings/{id}/           -> listing::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listings/", get(listing::list).post(listing::create))
        .route(
            "/listings/assignments/",
            get(assignment::list).post(assignment::create),
        )
        .route(
            "/listings/{id}/",
            get(listing::get_by_id)
                .put(listing::update)
                .delete(listing::delete),
        )
}
