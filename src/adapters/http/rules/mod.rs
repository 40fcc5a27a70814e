//! HTTP adapter for rule management endpoints.
//!
//! - `GET|POST /api/rules` - List or create rules
//! - `GET|PUT|DELETE /api/rules/:id` - Read, update or delete a rule
//! - `PUT /api/rules/reorder` - Priorities from list position
//! - `GET /api/rules/export`, `POST /api/rules/import` - Bulk transfer
//! - `GET /api/rules/categories` - Categories with rules
//! - `GET /api/rules/questions` - Question catalog view

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CategoryFilter, ImportRulesRequest, ReorderRulesRequest, RuleCommandResponse, RuleResponse,
    ReorderRulesResponse,
};
pub use routes::rule_routes;
