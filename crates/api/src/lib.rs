pub mod config;
pub mod error;
pub mod handlers;
pub mod payload;
pub mod router;
pub mod routes;
pub mod state;
