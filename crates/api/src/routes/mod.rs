pub mod health;
pub mod listings;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// ```text
/// /listings/                 list, create
/// /listings/assignments/     list, create (overlap-checked)
/// /listings/{id}/            get, replace, delete
/// ```
///
/// Paths keep their trailing slash. The static `assignments` segment wins
/// over `{id}` when both could match.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(listings::router())
}
