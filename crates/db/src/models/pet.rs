//! Pet entity model and DTOs.

use listings_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A pet row from the `pets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pet {
    pub id: DbId,
    pub listing_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a pet under a listing.
#[derive(Debug, Clone)]
pub struct CreatePet {
    pub listing_id: DbId,
    pub name: String,
}
