//! Listing entity model and DTOs.

use std::borrow::Cow;

use listings_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Longest accepted first/last name, in characters.
pub const MAX_NAME_CHARS: usize = 255;

/// A listing row from the `listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A listing together with the ids of everything it owns.
///
/// Serializes as `{first_name, last_name, pets, assignments}`; the listing's
/// own id is available to callers but not part of the representation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingSummary {
    #[serde(skip_serializing)]
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    /// Pet ids, ascending.
    pub pets: Vec<DbId>,
    /// Assignment ids, ascending.
    pub assignments: Vec<DbId>,
}

/// DTO for creating a listing, also used for full replacement on update.
#[derive(Debug, Clone, Validate)]
pub struct CreateListing {
    #[validate(custom(function = "validate_name"))]
    pub first_name: String,
    #[validate(custom(function = "validate_name"))]
    pub last_name: String,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("This field may not be blank."));
        return Err(err);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        let mut err = ValidationError::new("max_length");
        err.message = Some(Cow::Owned(format!(
            "Ensure this field has no more than {MAX_NAME_CHARS} characters."
        )));
        return Err(err);
    }
    Ok(())
}
