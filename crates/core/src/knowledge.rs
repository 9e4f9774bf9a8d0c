//! Knowledge articles and the immutable store that holds them.
//!
//! Articles are loaded once at startup and never change afterwards. Keywords
//! are normalized on the way in so matching can compare against lowercased
//! text without touching the articles again.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::KnowledgeError;

/// A canned resolution paired with the keywords that trigger it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeArticle {
    /// Unique article ID (e.g. `kb-101`)
    pub id: String,

    /// Display name
    pub title: String,

    /// Short description shown in the suggestion panel
    #[serde(default)]
    pub summary: String,

    /// Full reply text inserted or composed from this article
    pub response: String,

    /// Trigger terms, matched as substrings of the lowercased input
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Display-only revision date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,

    /// Static authority score in [0, 1], used as the ranking tie-break
    pub confidence: f64,
}

impl KnowledgeArticle {
    /// Confidence as a whole percentage, e.g. `92` for 0.92.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }

    /// `Mar 28, 2024`-style revision date, if one is recorded.
    pub fn last_updated_label(&self) -> Option<String> {
        self.last_updated.map(|d| d.format("%b %-d, %Y").to_string())
    }

    fn normalized(mut self) -> Self {
        let mut seen = HashSet::new();
        self.keywords = self
            .keywords
            .into_iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .collect();
        self
    }
}

/// Ordered, read-only collection of knowledge articles.
///
/// Cloning is cheap; all clones share the same articles.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    articles: Arc<Vec<KnowledgeArticle>>,
}

impl KnowledgeStore {
    /// Build a store, preserving the given order.
    ///
    /// Rejects empty or duplicate ids and confidences outside [0, 1].
    pub fn new(articles: Vec<KnowledgeArticle>) -> Result<Self, KnowledgeError> {
        let mut ids = HashSet::new();
        let mut normalized = Vec::with_capacity(articles.len());

        for article in articles {
            if article.id.trim().is_empty() {
                return Err(KnowledgeError::EmptyId);
            }
            if !ids.insert(article.id.clone()) {
                return Err(KnowledgeError::DuplicateId(article.id));
            }
            if !(0.0..=1.0).contains(&article.confidence) {
                return Err(KnowledgeError::InvalidConfidence {
                    id: article.id,
                    confidence: article.confidence,
                });
            }
            if article.keywords.iter().all(|k| k.trim().is_empty()) {
                tracing::warn!(article_id = %article.id, "Article has no keywords and will never match");
            }
            normalized.push(article.normalized());
        }

        Ok(Self {
            articles: Arc::new(normalized),
        })
    }

    /// All articles in their original order.
    pub fn all(&self) -> &[KnowledgeArticle] {
        &self.articles
    }

    pub fn get(&self, id: &str) -> Option<&KnowledgeArticle> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
