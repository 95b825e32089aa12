//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the repositories in `listings_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod assignment;
pub mod listing;
