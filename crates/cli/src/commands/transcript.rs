//! `supportdesk transcript` — Print the configured seed transcript.

use std::path::Path;

use crate::render;

pub fn run(config_path: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config.seed_messages)?);
        return Ok(());
    }

    if config.seed_messages.is_empty() {
        println!("  (no messages)");
        return Ok(());
    }
    for message in &config.seed_messages {
        println!("{}", render::message(message, &config.console.customer_name));
    }
    Ok(())
}
