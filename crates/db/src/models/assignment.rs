//! Assignment entity model and DTOs.

use listings_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An assignment row from the `assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub listing_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting an assignment that has already passed validation.
#[derive(Debug, Clone)]
pub struct CreateAssignment {
    pub listing_id: DbId,
    pub start_date: Date,
    pub end_date: Date,
}

/// Public representation: `{start_date, end_date, listing}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentView {
    pub start_date: Date,
    pub end_date: Date,
    pub listing: DbId,
}

impl From<Assignment> for AssignmentView {
    fn from(row: Assignment) -> Self {
        Self {
            start_date: row.start_date,
            end_date: row.end_date,
            listing: row.listing_id,
        }
    }
}
