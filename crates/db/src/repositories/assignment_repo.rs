//! Repository for the `assignments` table.

use async_trait::async_trait;
use listings_core::assignment::{AssignmentLookup, DateRange};
use listings_core::error::CoreError;
use listings_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::assignment::{Assignment, CreateAssignment};

const COLUMNS: &str = "id, listing_id, start_date, end_date, created_at, updated_at";

/// Provides insert, listing and overlap queries for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert an assignment, returning the created row.
    ///
    /// No scheduling rules are applied here; callers validate first, inside
    /// the same transaction.
    pub async fn create<'e, E>(executor: E, input: &CreateAssignment) -> Result<Assignment, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO assignments (listing_id, start_date, end_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(input.listing_id)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(executor)
            .await
    }

    /// List every assignment in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments ORDER BY id ASC");
        sqlx::query_as::<_, Assignment>(&query).fetch_all(pool).await
    }

    /// Total number of stored assignments.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assignments")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Whether any assignment of `listing_id` intersects the inclusive `range`.
    pub async fn exists_overlapping<'e, E>(
        executor: E,
        listing_id: DbId,
        range: DateRange,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM assignments
                WHERE listing_id = $1
                  AND start_date <= $3
                  AND end_date >= $2
            )",
        )
        .bind(listing_id)
        .bind(range.start)
        .bind(range.end)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }
}

/// [`AssignmentLookup`] over a live connection, typically an open transaction.
pub struct PgAssignmentLookup<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgAssignmentLookup<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl AssignmentLookup for PgAssignmentLookup<'_> {
    async fn overlapping_exists(
        &mut self,
        listing_id: DbId,
        range: DateRange,
    ) -> Result<bool, CoreError> {
        AssignmentRepo::exists_overlapping(&mut *self.conn, listing_id, range)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, listing_id, "Assignment overlap query failed");
                CoreError::Internal(e.to_string())
            })
    }
}
