//! Message domain types.
//!
//! These are the value objects that make up a support transcript:
//! Customer writes → Agent replies (typed or composed) → System notes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// The customer being supported
    Customer,
    /// The support agent (typed or auto-composed)
    Agent,
    /// Console-generated notices
    System,
}

impl Author {
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::Customer => "customer",
            Author::Agent => "agent",
            Author::System => "system",
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentiment tag carried by a message. A fixed label, not a classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Label shown next to a message. An untagged message reads as neutral.
    pub fn label(sentiment: Option<Sentiment>) -> &'static str {
        match sentiment {
            Some(Sentiment::Positive) => "Positive",
            Some(Sentiment::Negative) => "Needs Attention",
            Some(Sentiment::Neutral) | None => "Neutral",
        }
    }
}

/// A single message in the transcript.
///
/// Once appended to a conversation a message is never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who wrote this message
    pub author: Author,

    /// The text content
    pub body: String,

    /// Display timestamp, formatted when the message was created
    pub timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,

    /// Topic label shown as a chip under the message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl Message {
    /// Create a message with a freshly generated id.
    pub fn new(author: Author, body: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            author,
            body: body.into(),
            timestamp: timestamp.into(),
            sentiment: None,
            topic: None,
        }
    }

    /// Create a new customer message.
    pub fn customer(body: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self::new(Author::Customer, body, timestamp)
    }

    /// Create a new agent message.
    pub fn agent(body: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self::new(Author::Agent, body, timestamp)
    }

    /// Create a new system message.
    pub fn system(body: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self::new(Author::System, body, timestamp)
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Override the generated id (seed transcripts carry stable ids).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn is_from(&self, author: Author) -> bool {
        self.author == author
    }
}

/// Generate a short unique message id, e.g. `msg-3f9a1c0e`.
pub fn new_message_id() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("msg-{}", &uuid[..8])
}
