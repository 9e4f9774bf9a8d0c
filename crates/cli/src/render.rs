//! Plain-text rendering of transcript entries and suggestions.

use supportdesk_core::{Author, ConversationEvent, KnowledgeArticle, Message, Sentiment};

/// Name shown for the author of `message`.
pub fn author_label<'a>(message: &Message, customer_name: &'a str) -> &'a str {
    match message.author {
        Author::Agent => "You",
        Author::Customer => customer_name,
        Author::System => "System",
    }
}

/// `[9:24 AM] Jamie Rivera: body` followed by an indented topic/sentiment line.
pub fn message(message: &Message, customer_name: &str) -> String {
    let mut out = format!(
        "  [{}] {}:",
        message.timestamp,
        author_label(message, customer_name)
    );
    for line in message.body.lines() {
        out.push_str("\n      ");
        out.push_str(line);
    }

    let sentiment = Sentiment::label(message.sentiment);
    match &message.topic {
        Some(topic) => out.push_str(&format!("\n      ({topic} · {sentiment})")),
        None => out.push_str(&format!("\n      ({sentiment})")),
    }
    out
}

/// One suggestion-panel card.
pub fn article(article: &KnowledgeArticle) -> String {
    let mut out = format!(
        "  {} — {} ({}% match)",
        article.id,
        article.title,
        article.confidence_percent()
    );
    if !article.summary.is_empty() {
        out.push_str(&format!("\n      {}", article.summary));
    }
    if let Some(updated) = article.last_updated_label() {
        out.push_str(&format!("\n      Updated {updated}"));
    }
    out
}

/// Text for an event, or `None` if the event needs no output.
pub fn event(event: &ConversationEvent, customer_name: &str) -> Option<String> {
    match event {
        ConversationEvent::MessageAppended { message: m } => Some(message(m, customer_name)),
        ConversationEvent::ComposingStarted { outstanding, .. } => Some(if *outstanding > 1 {
            format!("  … AI drafting ({outstanding} follow-ups pending)")
        } else {
            "  … AI drafting: composing follow-up".to_string()
        }),
        ConversationEvent::ComposingFinished { .. } => None,
    }
}
