//! Carelink Match - volunteer matching
//!
//! Orchestrates the volunteer directory, the volunteer store, and the geo
//! math into the product's matching flows: refresh the store from the
//! backend, rank nearby candidates for a help request, and drive an
//! assignment through the status workflow.

pub mod models;
pub mod pipeline;

pub use models::{MatchCandidate, MatchPlan};
pub use pipeline::MatchPipeline;
