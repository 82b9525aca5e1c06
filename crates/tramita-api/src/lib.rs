// tramita-api: Async Rust client for the gestiones tracking REST API

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod fields;
pub mod models;
pub mod transport;

pub use client::{ApiClient, Body};
pub use error::Error;
