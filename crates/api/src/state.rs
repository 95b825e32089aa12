use std::sync::Arc;

use listings_core::clock::Clock;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: listings_db::DbPool,
    /// Source of "today" for assignment start-date checks.
    pub clock: Arc<dyn Clock>,
}
