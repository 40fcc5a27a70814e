//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.
//!
//! - `consultation` - Session lifecycle and inference
//! - `rules` - Rule store management, import and export
//! - `analysis` - Validation, question ranking, priority auto-fix

pub mod analysis;
pub mod consultation;
pub mod rules;
