//! # SupportDesk Core
//!
//! Domain types and error definitions for the SupportDesk agent console.
//! This crate has **no engine logic** — it defines the value objects the
//! matcher, composer and scheduler crates operate on.
//!
//! ## Design Philosophy
//!
//! Static data (knowledge articles, seed messages) enters the system as
//! explicit values passed at construction, never as globals. Time is read
//! through the [`Clock`] trait so tests can pin timestamps.

pub mod error;
pub mod message;
pub mod knowledge;
pub mod clock;
pub mod event;

// Re-export key types at crate root for ergonomics
pub use error::KnowledgeError;
pub use message::{Author, Message, Sentiment};
pub use knowledge::{KnowledgeArticle, KnowledgeStore};
pub use clock::{Clock, FixedClock, SystemClock};
pub use event::{ConversationEvent, EventBus};
