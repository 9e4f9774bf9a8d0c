//! `supportdesk match`, `compose` and `suggest` — One-shot views of the
//! assistant's reasoning.

use std::path::Path;
use std::sync::Arc;

use supportdesk_assist::{ComposerSettings, KeywordMatcher, ResponseComposer};
use supportdesk_core::SystemClock;
use supportdesk_workflow::ConsoleSession;

use crate::render;

pub fn run_match(config_path: Option<&Path>, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let matcher = KeywordMatcher::new(config.knowledge_store()?);

    println!();
    println!("  Ranking for: \"{text}\"");
    println!();
    for scored in matcher.rank(text) {
        println!(
            "  {:>2} keyword(s)  {:>3}%  {} — {}",
            scored.keyword_matches,
            scored.article.confidence_percent(),
            scored.article.id,
            scored.article.title
        );
    }
    println!();
    match matcher.best_match(text) {
        Some(article) => println!("  Best match: {} ({})", article.id, article.title),
        None => println!("  Best match: none (fallback reply)"),
    }
    println!();
    Ok(())
}

pub fn run_compose(
    config_path: Option<&Path>,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let composer = ResponseComposer::new(
        Arc::new(KeywordMatcher::new(config.knowledge_store()?)),
        ComposerSettings::from_config(&config),
        Arc::new(SystemClock),
    );

    let reply = composer.compose(text);
    println!("{}", render::message(&reply, &config.console.customer_name));
    Ok(())
}

pub async fn run_suggest(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let session = ConsoleSession::from_config(&config, Arc::new(SystemClock))?;

    println!();
    match session.store().latest_customer_message().await {
        Some(latest) => println!("  Latest from {}: \"{}\"", config.console.customer_name, latest.body),
        None => println!("  No customer messages yet."),
    }
    println!();
    println!("  AI Assist — suggested resolutions");
    for article in session.recommendations().await {
        println!("{}", render::article(&article));
    }
    println!();
    Ok(())
}
