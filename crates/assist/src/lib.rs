//! The suggestion assistant — matching, composing, and the transcript.
//!
//! 1. **Match** the latest customer text against the knowledge base
//!    ([`KeywordMatcher`]): keyword overlap first, authority score second.
//! 2. **Compose** a reply from the best article or a fallback template
//!    ([`ResponseComposer`]).
//! 3. **Record** messages in the append-only [`ConversationStore`], which also
//!    derives the suggestion panel's recommendation list.

pub mod composer;
pub mod conversation;
pub mod matcher;

pub use composer::{ComposerSettings, ResponseComposer};
pub use conversation::{ConversationStore, recommendations_for};
pub use matcher::{KeywordMatcher, ScoredArticle};
