//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - Where the HTTP representation differs from the row, a view struct

pub mod assignment;
pub mod listing;
pub mod pet;
