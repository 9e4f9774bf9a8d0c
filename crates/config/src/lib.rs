//! Configuration loading, validation, and management for SupportDesk.
//!
//! Loads configuration from `~/.supportdesk/config.toml` with environment
//! variable overrides. Everything the console treats as static data (the
//! knowledge base, canned replies, the seed transcript) lives here and is
//! handed to the engine at construction.

pub mod fixtures;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use supportdesk_core::clock::{DEFAULT_TIME_FORMAT, is_valid_time_format};
use supportdesk_core::{KnowledgeArticle, KnowledgeError, KnowledgeStore, Message};

/// Upper bound for the simulated composing delay.
pub const MAX_REPLY_DELAY_MS: u64 = 60_000;

/// The root configuration structure.
///
/// Maps directly to `~/.supportdesk/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Matching and reply composition settings
    #[serde(default)]
    pub assist: AssistConfig,

    /// Composing delay settings
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Operator console settings
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Knowledge articles, in ranking tie-break order
    #[serde(default = "fixtures::knowledge_articles")]
    pub knowledge: Vec<KnowledgeArticle>,

    /// Transcript the console opens with
    #[serde(default = "fixtures::seed_messages")]
    pub seed_messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Sentence appended to every matched article response
    #[serde(default = "default_confirmation_suffix")]
    pub confirmation_suffix: String,

    /// Body used when no article matches
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,

    /// Topic label used when no article matches
    #[serde(default = "default_fallback_topic")]
    pub fallback_topic: String,

    /// How many other articles follow the best match in the suggestion panel
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
}

fn default_confirmation_suffix() -> String {
    fixtures::CONFIRMATION_SUFFIX.into()
}
fn default_fallback_reply() -> String {
    fixtures::FALLBACK_REPLY.into()
}
fn default_fallback_topic() -> String {
    fixtures::FALLBACK_TOPIC.into()
}
fn default_max_alternatives() -> usize {
    2
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            confirmation_suffix: default_confirmation_suffix(),
            fallback_reply: default_fallback_reply(),
            fallback_topic: default_fallback_topic(),
            max_alternatives: default_max_alternatives(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Delay between an agent send and the composed follow-up
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

fn default_reply_delay_ms() -> u64 {
    900
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Display name of the customer in the transcript
    #[serde(default = "default_customer_name")]
    pub customer_name: String,

    /// Topic label on agent-typed replies
    #[serde(default = "default_custom_reply_topic")]
    pub custom_reply_topic: String,

    /// Text sent by the send-and-escalate action
    #[serde(default = "default_escalation_reply")]
    pub escalation_reply: String,

    /// strftime-style format for message timestamps
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Quick replies offered under the transcript
    #[serde(default = "fixtures::canned_replies")]
    pub canned_replies: Vec<String>,
}

fn default_customer_name() -> String {
    "Jamie Rivera".into()
}
fn default_custom_reply_topic() -> String {
    fixtures::CUSTOM_REPLY_TOPIC.into()
}
fn default_escalation_reply() -> String {
    fixtures::ESCALATION_REPLY.into()
}
fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.into()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            customer_name: default_customer_name(),
            custom_reply_topic: default_custom_reply_topic(),
            escalation_reply: default_escalation_reply(),
            time_format: default_time_format(),
            canned_replies: fixtures::canned_replies(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.supportdesk/config.toml).
    ///
    /// Environment overrides are applied on top:
    /// - `SUPPORTDESK_REPLY_DELAY_MS`
    /// - `SUPPORTDESK_TIME_FORMAT`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_path())
    }

    /// Load from `path`, then apply environment overrides and re-validate.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SUPPORTDESK_REPLY_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.scheduler.reply_delay_ms = ms,
                Err(e) => tracing::warn!(value = %raw, error = %e, "Ignoring SUPPORTDESK_REPLY_DELAY_MS"),
            }
        }

        if let Some(format) = lookup("SUPPORTDESK_TIME_FORMAT") {
            self.console.time_format = format;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".supportdesk")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.knowledge_store()?;

        if self.scheduler.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(ConfigError::ValidationError(format!(
                "scheduler.reply_delay_ms must be at most {MAX_REPLY_DELAY_MS}"
            )));
        }

        if self.console.time_format.trim().is_empty()
            || !is_valid_time_format(&self.console.time_format)
        {
            return Err(ConfigError::ValidationError(format!(
                "console.time_format '{}' is not a valid strftime format",
                self.console.time_format
            )));
        }

        Ok(())
    }

    /// Build the immutable knowledge store from the configured articles.
    pub fn knowledge_store(&self) -> Result<KnowledgeStore, ConfigError> {
        Ok(KnowledgeStore::new(self.knowledge.clone())?)
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assist: AssistConfig::default(),
            scheduler: SchedulerConfig::default(),
            console: ConsoleConfig::default(),
            knowledge: fixtures::knowledge_articles(),
            seed_messages: fixtures::seed_messages(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid knowledge base: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
