//! One operator's console: transcript, draft, suggestions, and send actions.

use std::sync::Arc;

use supportdesk_assist::{
    ComposerSettings, ConversationStore, KeywordMatcher, ResponseComposer,
};
use supportdesk_config::{AppConfig, ConfigError};
use supportdesk_core::{Clock, EventBus, KnowledgeArticle};

use crate::draft::Draft;
use crate::scheduler::{ReplyScheduler, ScheduledReply, SchedulerSettings, SchedulerState};

/// Everything behind the operator's buttons, wired from configuration.
pub struct ConsoleSession {
    store: ConversationStore,
    composer: Arc<ResponseComposer>,
    scheduler: ReplyScheduler,
    draft: Draft,
    canned_replies: Vec<String>,
    escalation_reply: String,
    max_alternatives: usize,
}

impl ConsoleSession {
    /// Build a session seeded with the configured transcript.
    pub fn from_config(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let matcher = Arc::new(KeywordMatcher::new(config.knowledge_store()?));
        let composer = Arc::new(ResponseComposer::new(
            matcher,
            ComposerSettings::from_config(config),
            clock,
        ));
        let store = ConversationStore::with_messages(
            config.seed_messages.clone(),
            Arc::new(EventBus::default()),
        );
        let scheduler = ReplyScheduler::new(
            store.clone(),
            composer.clone(),
            SchedulerSettings::from_config(config),
        );

        Ok(Self {
            store,
            composer,
            scheduler,
            draft: Draft::new(),
            canned_replies: config.console.canned_replies.clone(),
            escalation_reply: config.console.escalation_reply.clone(),
            max_alternatives: config.assist.max_alternatives,
        })
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn events(&self) -> &Arc<EventBus> {
        self.store.events()
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        self.composer.matcher()
    }

    pub fn composer(&self) -> &ResponseComposer {
        &self.composer
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn canned_replies(&self) -> &[String] {
        &self.canned_replies
    }

    pub async fn state(&self) -> SchedulerState {
        self.scheduler.state().await
    }

    pub async fn is_composing(&self) -> bool {
        self.scheduler.state().await == SchedulerState::Composing
    }

    /// Send arbitrary text as the agent.
    pub async fn send(&self, content: &str) -> Option<ScheduledReply> {
        self.scheduler.send(content).await
    }

    /// Send the draft. The draft is cleared only if something was sent.
    pub async fn send_draft(&mut self) -> Option<ScheduledReply> {
        let scheduled = self.scheduler.send(self.draft.text()).await?;
        self.draft.clear();
        Some(scheduled)
    }

    /// Send the fixed escalation notice. Like any send, this discards the
    /// draft.
    pub async fn send_and_escalate(&mut self) -> Option<ScheduledReply> {
        let scheduled = self.scheduler.send(&self.escalation_reply).await?;
        self.draft.clear();
        Some(scheduled)
    }

    /// Insert canned reply `index` into the draft.
    pub fn insert_canned(&mut self, index: usize) -> Option<&str> {
        let reply = self.canned_replies.get(index)?;
        self.draft.insert(reply);
        Some(reply.as_str())
    }

    /// Insert an article's resolution text into the draft.
    pub fn insert_resolution(&mut self, article_id: &str) -> Option<&KnowledgeArticle> {
        let article = self.composer.matcher().store().get(article_id)?;
        self.draft.insert(&article.response);
        Some(article)
    }

    /// Compose a reply to the latest customer message and insert it into the
    /// draft. Does nothing when the customer has not written yet.
    pub async fn auto_draft(&mut self) -> Option<String> {
        let latest = self.store.latest_customer_message().await?;
        let body = self.composer.compose(&latest.body).body;
        self.draft.insert(&body);
        Some(body)
    }

    /// Suggestion panel contents for the current transcript.
    pub async fn recommendations(&self) -> Vec<KnowledgeArticle> {
        self.store
            .recommendations(self.composer.matcher(), self.max_alternatives)
            .await
    }
}
