//! Repository for the `pets` table.
//!
//! Pets have no HTTP surface; they reach clients only as ids inside a
//! listing summary. These queries exist to seed and inspect pets directly.

use listings_core::types::DbId;
use sqlx::PgPool;

use crate::models::pet::{CreatePet, Pet};

const COLUMNS: &str = "id, listing_id, name, created_at, updated_at";

/// Provides insert and lookup operations for pets.
pub struct PetRepo;

impl PetRepo {
    /// Insert a new pet, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePet) -> Result<Pet, sqlx::Error> {
        let query = format!(
            "INSERT INTO pets (listing_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(input.listing_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List a listing's pets, oldest first.
    pub async fn list_by_listing(pool: &PgPool, listing_id: DbId) -> Result<Vec<Pet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pets WHERE listing_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Pet>(&query)
            .bind(listing_id)
            .fetch_all(pool)
            .await
    }
}
