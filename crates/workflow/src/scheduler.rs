//! The send → composing → reply state machine.
//!
//! ```text
//!   Idle ──send(text)──▶ Composing ──timer fires──▶ Idle
//!    ▲                      │
//!    └──────────────────────┘  (send is accepted in either state)
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use supportdesk_assist::{ConversationStore, ResponseComposer};
use supportdesk_config::AppConfig;
use supportdesk_core::{Message, Sentiment};

/// Whether a composed reply is pending.
///
/// With overlapping sends the scheduler stays `Composing` until the last
/// outstanding reply has landed, not just the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Composing,
}

#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    /// How long a composed reply takes to land
    pub reply_delay: Duration,
    /// Topic label on agent-typed replies
    pub custom_reply_topic: String,
    pub time_format: String,
}

impl SchedulerSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            reply_delay: Duration::from_millis(config.scheduler.reply_delay_ms),
            custom_reply_topic: config.console.custom_reply_topic.clone(),
            time_format: config.console.time_format.clone(),
        }
    }
}

/// A composed reply that has been scheduled.
///
/// The reply lands whether or not this handle is kept; dropping it only
/// gives up the ability to wait for the composed message. There is no way to
/// abort it.
#[derive(Debug)]
pub struct ScheduledReply {
    outbound: Message,
    target: String,
    handle: JoinHandle<Message>,
}

impl ScheduledReply {
    /// The agent message appended by the send.
    pub fn outbound(&self) -> &Message {
        &self.outbound
    }

    /// The text the reply is being composed for.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Wait until the composed reply has been appended and return it.
    pub async fn landed(self) -> Option<Message> {
        match self.handle.await {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!(error = %e, "Composed reply task did not complete");
                None
            }
        }
    }
}

/// Appends agent sends and schedules the composed follow-up for each.
#[derive(Clone)]
pub struct ReplyScheduler {
    store: ConversationStore,
    composer: Arc<ResponseComposer>,
    settings: SchedulerSettings,
}

impl ReplyScheduler {
    pub fn new(
        store: ConversationStore,
        composer: Arc<ResponseComposer>,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            store,
            composer,
            settings,
        }
    }

    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    pub async fn state(&self) -> SchedulerState {
        if self.store.is_composing().await {
            SchedulerState::Composing
        } else {
            SchedulerState::Idle
        }
    }

    /// Send `content` as the agent and schedule a composed follow-up.
    ///
    /// Blank content is ignored: nothing is appended and no reply is
    /// scheduled. The follow-up answers the latest customer message, or
    /// `content` itself when the customer has not written yet.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn send(&self, content: &str) -> Option<ScheduledReply> {
        let content = content.trim();
        if content.is_empty() {
            debug!("Ignoring blank send");
            return None;
        }

        let outbound = Message::agent(
            content,
            self.composer.clock().timestamp(&self.settings.time_format),
        )
        .with_sentiment(Sentiment::Positive)
        .with_topic(self.settings.custom_reply_topic.clone());

        let target = self
            .store
            .latest_customer_message()
            .await
            .map(|m| m.body)
            .unwrap_or_else(|| content.to_string());

        self.store.append(outbound.clone()).await;
        let outstanding = self.store.begin_composing(&target).await;
        if outstanding > 1 {
            warn!(
                outstanding,
                "Send issued while a composed reply is still pending; replies will land independently"
            );
        }
        info!(id = %outbound.id, outstanding, "Agent reply sent, composing follow-up");

        // The timer starts now, not when the task is first polled
        let deadline = Instant::now() + self.settings.reply_delay;
        let handle = tokio::spawn({
            let store = self.store.clone();
            let composer = self.composer.clone();
            let target = target.clone();
            async move {
                tokio::time::sleep_until(deadline).await;
                let reply = composer.compose(&target);
                store.append(reply.clone()).await;
                let remaining = store.finish_composing(reply.topic.clone()).await;
                info!(
                    id = %reply.id,
                    topic = reply.topic.as_deref().unwrap_or_default(),
                    remaining,
                    "Composed reply landed"
                );
                reply
            }
        });

        Some(ScheduledReply {
            outbound,
            target,
            handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use supportdesk_assist::{ComposerSettings, KeywordMatcher};
    use supportdesk_config::fixtures;
    use supportdesk_core::{Author, EventBus, FixedClock};

    fn scheduler_with(seed: Vec<Message>) -> (ReplyScheduler, ConversationStore) {
        let config = AppConfig::default();
        let matcher = Arc::new(KeywordMatcher::new(config.knowledge_store().unwrap()));
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2024, 4, 9)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        );
        let composer = Arc::new(ResponseComposer::new(
            matcher,
            ComposerSettings::from_config(&config),
            Arc::new(clock),
        ));
        let store = ConversationStore::with_messages(seed, Arc::new(EventBus::default()));
        let scheduler =
            ReplyScheduler::new(store.clone(), composer, SchedulerSettings::from_config(&config));
        (scheduler, store)
    }

    #[tokio::test(start_paused = true)]
    async fn send_appends_then_reply_lands_after_delay() {
        let (scheduler, store) = scheduler_with(fixtures::seed_messages());
        assert_eq!(scheduler.state().await, SchedulerState::Idle);

        let scheduled = scheduler.send("  Checking now  ").await.unwrap();
        assert_eq!(scheduled.outbound().body, "Checking now");
        assert_eq!(scheduled.outbound().topic.as_deref(), Some("Custom reply"));
        assert_eq!(scheduled.outbound().sentiment, Some(Sentiment::Positive));
        assert_eq!(scheduled.outbound().timestamp, "9:30 AM");
        assert_eq!(store.len().await, 4);
        assert_eq!(scheduler.state().await, SchedulerState::Composing);

        tokio::time::advance(Duration::from_millis(899)).await;
        tokio::task::yield_now().await;
        assert_eq!(store.len().await, 4);

        let reply = scheduled.landed().await.unwrap();
        assert_eq!(reply.author, Author::Agent);
        assert_eq!(store.len().await, 5);
        assert_eq!(store.messages().await.last().unwrap().id, reply.id);
        assert_eq!(scheduler.state().await, SchedulerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_lands_exactly_one_delay_after_send() {
        let (scheduler, store) = scheduler_with(vec![]);
        let _scheduled = scheduler.send("hello").await.unwrap();

        tokio::time::advance(scheduler.settings().reply_delay).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(store.len().await, 2);
        assert_eq!(scheduler.state().await, SchedulerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_timers_keep_their_spacing() {
        let (scheduler, store) = scheduler_with(vec![]);
        let _first = scheduler.send("first").await.unwrap();
        tokio::time::advance(Duration::from_millis(300)).await;
        let _second = scheduler.send("second").await.unwrap();

        // First timer fires at 900ms, second at 1200ms
        tokio::time::advance(Duration::from_millis(600)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(store.len().await, 3);
        assert_eq!(store.outstanding().await, 1);
        assert_eq!(scheduler.state().await, SchedulerState::Composing);

        tokio::time::advance(Duration::from_millis(300)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(store.len().await, 4);
        assert_eq!(scheduler.state().await, SchedulerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_targets_latest_customer_message() {
        let (scheduler, _store) = scheduler_with(fixtures::seed_messages());
        let scheduled = scheduler.send("On it").await.unwrap();
        assert!(scheduled.target().starts_with("App shows 2.4GHz"));

        // "firmware update" matches nothing in the knowledge base
        let reply = scheduled.landed().await.unwrap();
        assert_eq!(reply.body, fixtures::FALLBACK_REPLY);
        assert_eq!(reply.topic.as_deref(), Some("Follow-up"));
    }

    #[tokio::test(start_paused = true)]
    async fn target_falls_back_to_sent_text() {
        let (scheduler, _store) = scheduler_with(vec![]);
        let scheduled = scheduler.send("hello").await.unwrap();
        assert_eq!(scheduled.target(), "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn blank_send_is_a_no_op() {
        let (scheduler, store) = scheduler_with(fixtures::seed_messages());
        assert!(scheduler.send("   ").await.is_none());
        assert!(scheduler.send("").await.is_none());
        assert_eq!(store.len().await, 3);
        assert_eq!(store.outstanding().await, 0);
        assert_eq!(scheduler.state().await, SchedulerState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_sends_both_land_in_order() {
        let (scheduler, store) = scheduler_with(vec![Message::customer(
            "sensor offline",
            "9:20 AM",
        )]);

        let first = scheduler.send("first").await.unwrap();
        tokio::time::advance(Duration::from_millis(100)).await;
        let second = scheduler.send("second").await.unwrap();
        assert_eq!(store.outstanding().await, 2);

        let first_reply = first.landed().await.unwrap();
        let second_reply = second.landed().await.unwrap();
        assert_eq!(scheduler.state().await, SchedulerState::Idle);

        let ids: Vec<String> = store.messages().await.into_iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), 5);
        assert_eq!(ids[3], first_reply.id);
        assert_eq!(ids[4], second_reply.id);

        let messages = store.messages().await;
        assert_eq!(messages[1].body, "first");
        assert_eq!(messages[2].body, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handle_still_lands() {
        let (scheduler, store) = scheduler_with(vec![]);
        drop(scheduler.send("fire and forget").await.unwrap());

        tokio::time::sleep(Duration::from_millis(901)).await;
        assert_eq!(store.len().await, 2);
        assert!(!store.is_composing().await);
    }
}
