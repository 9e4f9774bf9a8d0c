//! Conversation events — how front-ends learn about transcript changes.
//!
//! Events are published when the transcript grows or the composing
//! indicator changes. Renderers subscribe instead of polling the store.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::message::Message;

/// All conversation events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConversationEvent {
    /// A message was appended to the transcript
    MessageAppended { message: Message },

    /// A reply is being composed for `target_preview`
    ComposingStarted {
        target_preview: String,
        outstanding: usize,
    },

    /// A composed reply landed in the transcript
    ComposingFinished {
        topic: Option<String>,
        outstanding: usize,
    },
}

/// A broadcast-based event bus for conversation events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<ConversationEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: ConversationEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<ConversationEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
