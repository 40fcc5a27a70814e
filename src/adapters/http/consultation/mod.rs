//! HTTP adapter for consultation endpoints.
//!
//! - `POST /api/consultation/start` - Start or restart a session
//! - `POST /api/consultation/:id/answer` - Answer a question
//! - `POST /api/consultation/:id/skip` - Skip a question
//! - `POST /api/consultation/:id/back` - Undo the last step
//! - `POST /api/consultation/:id/reset` - Reset the session
//! - `GET /api/consultation/:id/status` - Session state
//! - `GET /api/consultation/:id/question` - Current question

mod dto;
mod handlers;
mod routes;

pub use dto::{AnswerRequest, ConsultationResponse, SkipRequest, StartConsultationRequest};
pub use routes::consultation_routes;
