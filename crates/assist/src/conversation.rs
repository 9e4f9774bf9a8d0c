//! The append-only transcript and its composing indicator.

use std::sync::Arc;
use tokio::sync::RwLock;

use supportdesk_core::event::preview;
use supportdesk_core::{Author, ConversationEvent, EventBus, KnowledgeArticle, Message};

use crate::matcher::KeywordMatcher;

#[derive(Debug, Default)]
struct ConversationState {
    messages: Vec<Message>,
    /// Composed replies scheduled but not yet appended
    outstanding: usize,
}

/// Ordered message log shared between the console and its reply tasks.
///
/// Messages are only ever appended; insertion order is conversation order.
/// Cloning yields another handle to the same transcript.
#[derive(Clone)]
pub struct ConversationStore {
    state: Arc<RwLock<ConversationState>>,
    events: Arc<EventBus>,
}

impl ConversationStore {
    pub fn new(events: Arc<EventBus>) -> Self {
        Self::with_messages(Vec::new(), events)
    }

    /// Start from an existing transcript (e.g. the configured seed messages).
    pub fn with_messages(messages: Vec<Message>, events: Arc<EventBus>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ConversationState {
                messages,
                outstanding: 0,
            })),
            events,
        }
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Add a message to the end of the transcript.
    pub async fn append(&self, message: Message) {
        tracing::debug!(id = %message.id, author = %message.author, "Appending message");
        self.state.write().await.messages.push(message.clone());
        self.events
            .publish(ConversationEvent::MessageAppended { message });
    }

    /// Snapshot of the transcript in order.
    pub async fn messages(&self) -> Vec<Message> {
        self.state.read().await.messages.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.messages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.messages.is_empty()
    }

    /// The most recent customer-authored message.
    pub async fn latest_customer_message(&self) -> Option<Message> {
        self.state
            .read()
            .await
            .messages
            .iter()
            .rev()
            .find(|m| m.is_from(Author::Customer))
            .cloned()
    }

    /// Whether any composed reply is still pending.
    pub async fn is_composing(&self) -> bool {
        self.state.read().await.outstanding > 0
    }

    pub async fn outstanding(&self) -> usize {
        self.state.read().await.outstanding
    }

    /// Mark one more reply as being composed. Returns the new outstanding count.
    pub async fn begin_composing(&self, target: &str) -> usize {
        let outstanding = {
            let mut state = self.state.write().await;
            state.outstanding += 1;
            state.outstanding
        };
        self.events.publish(ConversationEvent::ComposingStarted {
            target_preview: preview(target, 60),
            outstanding,
        });
        outstanding
    }

    /// Mark one composed reply as landed. Returns the remaining outstanding count.
    pub async fn finish_composing(&self, topic: Option<String>) -> usize {
        let outstanding = {
            let mut state = self.state.write().await;
            state.outstanding = state.outstanding.saturating_sub(1);
            state.outstanding
        };
        self.events
            .publish(ConversationEvent::ComposingFinished { topic, outstanding });
        outstanding
    }

    /// Recommendations for the latest customer message in this transcript.
    pub async fn recommendations(
        &self,
        matcher: &KeywordMatcher,
        max_alternatives: usize,
    ) -> Vec<KnowledgeArticle> {
        let latest = self.latest_customer_message().await;
        recommendations_for(matcher, latest.as_ref(), max_alternatives)
    }
}

/// The suggestion panel's article list for `message`.
///
/// With a matching customer message: the best match, then up to
/// `max_alternatives` other articles in store order. Otherwise (no customer
/// message, or nothing matched) the whole knowledge base.
pub fn recommendations_for(
    matcher: &KeywordMatcher,
    message: Option<&Message>,
    max_alternatives: usize,
) -> Vec<KnowledgeArticle> {
    let all = matcher.store().all();

    let Some(message) = message else {
        return all.to_vec();
    };
    let Some(best) = matcher.best_match(&message.body) else {
        return all.to_vec();
    };

    std::iter::once(best.clone())
        .chain(
            all.iter()
                .filter(|a| a.id != best.id)
                .take(max_alternatives)
                .cloned(),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use supportdesk_core::{KnowledgeStore, Sentiment};

    fn article(id: &str, keywords: &[&str]) -> KnowledgeArticle {
        KnowledgeArticle {
            id: id.into(),
            title: id.into(),
            summary: String::new(),
            response: format!("response {id}"),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            last_updated: None,
            confidence: 0.5,
        }
    }

    fn matcher() -> KeywordMatcher {
        KeywordMatcher::new(
            KnowledgeStore::new(vec![
                article("a", &["alpha"]),
                article("b", &["beta"]),
                article("c", &["gamma"]),
                article("d", &["delta"]),
            ])
            .unwrap(),
        )
    }

    fn ids(articles: &[KnowledgeArticle]) -> Vec<&str> {
        articles.iter().map(|a| a.id.as_str()).collect()
    }

    #[tokio::test]
    async fn append_preserves_order() {
        let store = ConversationStore::new(Arc::new(EventBus::default()));
        assert!(store.is_empty().await);

        store.append(Message::customer("one", "9:00 AM").with_id("m1")).await;
        store.append(Message::agent("two", "9:01 AM").with_id("m2")).await;
        store.append(Message::system("three", "9:02 AM").with_id("m3")).await;

        let ids: Vec<String> = store.messages().await.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn latest_customer_message_scans_from_end() {
        let store = ConversationStore::with_messages(
            vec![
                Message::customer("first", "9:00 AM"),
                Message::customer("second", "9:01 AM"),
                Message::agent("reply", "9:02 AM"),
            ],
            Arc::new(EventBus::default()),
        );
        assert_eq!(store.latest_customer_message().await.unwrap().body, "second");
    }

    #[tokio::test]
    async fn no_customer_message_is_none() {
        let store = ConversationStore::with_messages(
            vec![Message::agent("hello", "9:00 AM")],
            Arc::new(EventBus::default()),
        );
        assert!(store.latest_customer_message().await.is_none());
    }

    #[tokio::test]
    async fn append_publishes_event() {
        let bus = Arc::new(EventBus::new(8));
        let mut rx = bus.subscribe();
        let store = ConversationStore::new(bus);

        store
            .append(Message::agent("hi", "9:00 AM").with_sentiment(Sentiment::Positive))
            .await;

        match rx.recv().await.unwrap().as_ref() {
            ConversationEvent::MessageAppended { message } => assert_eq!(message.body, "hi"),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn composing_counter_tracks_outstanding_replies() {
        let store = ConversationStore::new(Arc::new(EventBus::default()));
        assert!(!store.is_composing().await);

        assert_eq!(store.begin_composing("target").await, 1);
        assert_eq!(store.begin_composing("target").await, 2);
        assert!(store.is_composing().await);

        assert_eq!(store.finish_composing(None).await, 1);
        assert!(store.is_composing().await);
        assert_eq!(store.finish_composing(None).await, 0);
        assert!(!store.is_composing().await);

        // Never underflows
        assert_eq!(store.finish_composing(None).await, 0);
    }

    #[test]
    fn recommendations_lead_with_best_match() {
        let m = matcher();
        let msg = Message::customer("gamma ray", "9:00 AM");
        let recs = recommendations_for(&m, Some(&msg), 2);
        assert_eq!(ids(&recs), vec!["c", "a", "b"]);
    }

    #[test]
    fn alternatives_are_capped() {
        let m = matcher();
        let msg = Message::customer("alpha", "9:00 AM");
        assert_eq!(ids(&recommendations_for(&m, Some(&msg), 2)), vec!["a", "b", "c"]);
        assert_eq!(ids(&recommendations_for(&m, Some(&msg), 0)), vec!["a"]);
    }

    #[test]
    fn no_customer_message_returns_everything() {
        let m = matcher();
        assert_eq!(ids(&recommendations_for(&m, None, 2)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn unmatched_message_returns_everything() {
        let m = matcher();
        let msg = Message::customer("nothing here", "9:00 AM");
        assert_eq!(ids(&recommendations_for(&m, Some(&msg), 2)), vec!["a", "b", "c", "d"]);
    }

    #[tokio::test]
    async fn store_recommendations_use_latest_customer_message() {
        let store = ConversationStore::with_messages(
            vec![
                Message::customer("alpha", "9:00 AM"),
                Message::customer("delta", "9:01 AM"),
            ],
            Arc::new(EventBus::default()),
        );
        let recs = store.recommendations(&matcher(), 2).await;
        assert_eq!(ids(&recs), vec!["d", "a", "b"]);
    }
}
