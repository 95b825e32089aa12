//! Domain layer for the listings service.
//!
//! Holds identifier types, the shared error enum, the clock seam and the
//! assignment scheduling rules. Nothing in here performs I/O, so both the
//! repository layer and the HTTP layer can depend on it.

pub mod assignment;
pub mod clock;
pub mod error;
pub mod types;
