//! Visa Expert - Rule-based visa eligibility consultations
//!
//! A forward-chaining inference engine over production rules, with
//! backward-chaining question selection, undo, rule-base validation and
//! an HTTP API for consultations and rule management.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
