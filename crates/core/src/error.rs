//! Error types for the SupportDesk domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! The engine operations themselves are total; errors only arise while
//! building the knowledge base the engine runs on.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KnowledgeError {
    #[error("Duplicate article id: {0}")]
    DuplicateId(String),

    #[error("Article {id} has confidence {confidence}, expected a value in [0, 1]")]
    InvalidConfidence { id: String, confidence: f64 },

    #[error("Article id must not be empty")]
    EmptyId,
}
