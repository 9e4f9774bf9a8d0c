//! `supportdesk config` — Configuration management commands.

use std::path::Path;

use supportdesk_config::AppConfig;

pub fn validate(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let file = super::config_file(config_path);
    println!("🔍 Validating {}...", file.display());

    let config = match AppConfig::load_with_env(&file) {
        Ok(config) => config,
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    };
    println!("   ✅ Config parsed successfully");

    let warnings = warnings(&config);
    if warnings.is_empty() {
        println!("   ✅ All checks passed");
    } else {
        println!();
        for w in &warnings {
            println!("   ⚠️  {w}");
        }
    }

    println!();
    println!("   Knowledge:   {}", config.knowledge.len());
    println!("   Canned:      {}", config.console.canned_replies.len());
    println!("   Reply delay: {} ms", config.scheduler.reply_delay_ms);
    Ok(())
}

/// Problems that do not stop the console from running.
fn warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    for article in config.knowledge.iter().filter(|a| a.keywords.is_empty()) {
        warnings.push(format!("Article {} has no keywords and can never match", article.id));
    }
    if config.knowledge.is_empty() {
        warnings.push("Knowledge base is empty; every reply will be the fallback".into());
    }
    if config.console.canned_replies.iter().any(|r| r.trim().is_empty()) {
        warnings.push("One or more canned replies are blank".into());
    }
    if config.assist.fallback_reply.trim().is_empty() {
        warnings.push("Fallback reply is blank".into());
    }

    warnings
}

pub fn show(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(config_path: Option<&Path>) {
    println!("{}", super::config_file(config_path).display());
}
