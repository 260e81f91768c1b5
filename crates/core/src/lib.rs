//! Domain core for the bucketlist service.
//!
//! Dependency-light crate shared by the persistence and API layers: the
//! domain error taxonomy, shared type aliases, input validation rules, and
//! pagination clamping.

pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
