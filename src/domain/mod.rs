//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `rules` - Production rules, question catalog, compiled rule sets
//! - `consultation` - Inference engine and the consultation aggregate
//! - `analysis` - Pure rule-base analysis (validation, question ranking, auto-fix)

pub mod analysis;
pub mod consultation;
pub mod foundation;
pub mod rules;
