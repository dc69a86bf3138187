//! Core types, validation, and the intake workflow for the candidate roster.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod domain;
pub mod error;
pub mod intake;
pub mod store;
pub mod submission;
pub mod validate;

pub use error::{FetchError, IntakeError};
pub use validate::FieldErrors;
