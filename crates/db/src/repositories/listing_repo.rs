//! Repository for the `listings` table.

use listings_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::listing::{CreateListing, Listing, ListingSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, created_at, updated_at";

/// Listing columns plus the owned pet and assignment ids, each ascending.
const SUMMARY_SELECT: &str = "SELECT l.id, l.first_name, l.last_name, \
        COALESCE((SELECT array_agg(p.id ORDER BY p.id) FROM pets p \
                  WHERE p.listing_id = l.id), '{}') AS pets, \
        COALESCE((SELECT array_agg(a.id ORDER BY a.id) FROM assignments a \
                  WHERE a.listing_id = l.id), '{}') AS assignments \
     FROM listings l";

/// Provides CRUD operations for listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateListing) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings (first_name, last_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    /// Find a listing by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a listing and lock its row until the surrounding transaction ends.
    ///
    /// Concurrent writers that lock the same listing queue behind this one,
    /// which is what serializes assignment overlap checks per listing.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List every listing with its pet and assignment ids, in creation order.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<ListingSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} ORDER BY l.id ASC");
        sqlx::query_as::<_, ListingSummary>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find one listing with its pet and assignment ids.
    pub async fn find_summary(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ListingSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE l.id = $1");
        sqlx::query_as::<_, ListingSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace both names of a listing.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateListing,
    ) -> Result<Option<Listing>, sqlx::Error> {
        let query = format!(
            "UPDATE listings SET first_name = $2, last_name = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a listing. Pets and assignments go with it via `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
