//! `supportdesk status` — Show configuration summary.

use std::path::Path;

pub fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let file = super::config_file(config_path);
    let config = super::load_config(config_path)?;

    println!("SupportDesk Status");
    println!("==================");
    println!("  Config file:  {}", file.display());
    println!("  Customer:     {}", config.console.customer_name);
    println!("  Knowledge:    {} articles", config.knowledge.len());
    println!("  Canned:       {} replies", config.console.canned_replies.len());
    println!("  Seed:         {} messages", config.seed_messages.len());
    println!("  Reply delay:  {} ms", config.scheduler.reply_delay_ms);
    println!("  Alternatives: {}", config.assist.max_alternatives);
    println!("  Time format:  {}", config.console.time_format);

    if file.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — using built-in PulseCare defaults");
    }

    Ok(())
}
