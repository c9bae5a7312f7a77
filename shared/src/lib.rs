//! Shared types and models for the café ordering platform
//!
//! This crate contains the domain types used by the backend and by any
//! client that speaks its JSON API.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
