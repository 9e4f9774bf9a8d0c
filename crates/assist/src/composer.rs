//! Reply composition from the best-matching article.

use std::sync::Arc;

use supportdesk_config::AppConfig;
use supportdesk_core::{Clock, Message, Sentiment};

use crate::matcher::KeywordMatcher;

/// Fixed text and formatting used when composing replies.
#[derive(Debug, Clone)]
pub struct ComposerSettings {
    /// Appended (after a space) to a matched article's response
    pub confirmation_suffix: String,
    /// Whole body when nothing matched
    pub fallback_reply: String,
    /// Topic when nothing matched
    pub fallback_topic: String,
    pub time_format: String,
}

impl ComposerSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            confirmation_suffix: config.assist.confirmation_suffix.clone(),
            fallback_reply: config.assist.fallback_reply.clone(),
            fallback_topic: config.assist.fallback_topic.clone(),
            time_format: config.console.time_format.clone(),
        }
    }
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Builds agent replies for a piece of customer text.
///
/// Composed replies are always tagged positive; the tag is a fixed label.
pub struct ResponseComposer {
    matcher: Arc<KeywordMatcher>,
    settings: ComposerSettings,
    clock: Arc<dyn Clock>,
}

impl ResponseComposer {
    pub fn new(
        matcher: Arc<KeywordMatcher>,
        settings: ComposerSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            matcher,
            settings,
            clock,
        }
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    /// Compose a reply to `text`. Never fails.
    pub fn compose(&self, text: &str) -> Message {
        let (body, topic) = match self.matcher.best_match(text) {
            Some(article) => {
                let body = if self.settings.confirmation_suffix.is_empty() {
                    article.response.clone()
                } else {
                    format!("{} {}", article.response, self.settings.confirmation_suffix)
                };
                (body, article.title.clone())
            }
            None => (
                self.settings.fallback_reply.clone(),
                self.settings.fallback_topic.clone(),
            ),
        };

        Message::agent(body, self.clock.timestamp(&self.settings.time_format))
            .with_sentiment(Sentiment::Positive)
            .with_topic(topic)
    }
}

impl std::fmt::Debug for ResponseComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseComposer")
            .field("matcher", &self.matcher)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use supportdesk_config::fixtures;
    use supportdesk_core::{Author, FixedClock};

    fn composer() -> ResponseComposer {
        let config = AppConfig::default();
        let matcher = Arc::new(KeywordMatcher::new(config.knowledge_store().unwrap()));
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2024, 4, 9)
                .unwrap()
                .and_hms_opt(9, 26, 0)
                .unwrap(),
        );
        ResponseComposer::new(matcher, ComposerSettings::from_config(&config), Arc::new(clock))
    }

    #[test]
    fn matched_reply_starts_with_article_response() {
        let c = composer();
        let reply = c.compose("sensor offline red LED Wi-Fi");
        let kb101 = c.matcher().store().get("kb-101").unwrap();

        assert!(reply.body.starts_with(&kb101.response));
        assert!(reply.body.ends_with(fixtures::CONFIRMATION_SUFFIX));
        assert_eq!(reply.topic.as_deref(), Some("Restore Offline Sensors"));
        assert_eq!(reply.author, Author::Agent);
        assert_eq!(reply.sentiment, Some(Sentiment::Positive));
        assert_eq!(reply.timestamp, "9:26 AM");
    }

    #[test]
    fn unmatched_reply_is_fallback() {
        let reply = composer().compose("nothing relevant whatsoever");
        assert_eq!(reply.body, fixtures::FALLBACK_REPLY);
        assert_eq!(reply.topic.as_deref(), Some("Follow-up"));
        assert_eq!(reply.sentiment, Some(Sentiment::Positive));
    }

    #[test]
    fn compose_always_returns_a_message() {
        let c = composer();
        for text in ["", "gibberish xyz"] {
            let reply = c.compose(text);
            assert!(!reply.body.is_empty());
            assert_eq!(reply.author, Author::Agent);
            assert!(reply.id.starts_with("msg-"));
        }
    }

    #[test]
    fn each_reply_gets_a_fresh_id() {
        let c = composer();
        assert_ne!(c.compose("sensor").id, c.compose("sensor").id);
    }

    #[test]
    fn empty_suffix_leaves_response_untouched() {
        let config = AppConfig::default();
        let matcher = Arc::new(KeywordMatcher::new(config.knowledge_store().unwrap()));
        let settings = ComposerSettings {
            confirmation_suffix: String::new(),
            ..ComposerSettings::from_config(&config)
        };
        let c = ResponseComposer::new(matcher, settings, Arc::new(supportdesk_core::SystemClock));
        let reply = c.compose("billing payment");
        assert_eq!(reply.body, c.matcher().store().get("kb-204").unwrap().response);
    }
}
