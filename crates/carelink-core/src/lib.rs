//! Carelink Core - Domain models, errors, and configuration
//!
//! This crate contains the shared domain types and contracts for the carelink
//! workspace: volunteers, help requests, chat, community news, and the
//! resolved-location record the rest of the system passes around.

pub mod config;
pub mod error;
pub mod models;

pub use error::{CareError, Result};
