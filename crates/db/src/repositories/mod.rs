//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods that must run inside a caller's transaction take a generic
//! executor or `&mut PgConnection` instead of `&PgPool`.

pub mod assignment_repo;
pub mod listing_repo;
pub mod pet_repo;

pub use assignment_repo::{AssignmentRepo, PgAssignmentLookup};
pub use listing_repo::ListingRepo;
pub use pet_repo::PetRepo;
