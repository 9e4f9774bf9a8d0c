//! Keyword-overlap ranking of knowledge articles.
//!
//! There is no language understanding here: the input is lowercased and each
//! article scores one point per keyword found anywhere in it as a substring.

use std::cmp::Ordering;
use supportdesk_core::{KnowledgeArticle, KnowledgeStore};

/// An article paired with the number of its keywords found in the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredArticle<'a> {
    pub article: &'a KnowledgeArticle,
    pub keyword_matches: usize,
}

/// Ranks the articles of a [`KnowledgeStore`] against free text.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    store: KnowledgeStore,
}

impl KeywordMatcher {
    pub fn new(store: KnowledgeStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Every article, best first.
    ///
    /// Ordered by keyword matches, then confidence, both descending. Articles
    /// still tied keep their store order.
    pub fn rank(&self, text: &str) -> Vec<ScoredArticle<'_>> {
        let normalized = text.to_lowercase();

        let mut scored: Vec<ScoredArticle<'_>> = self
            .store
            .all()
            .iter()
            .map(|article| ScoredArticle {
                article,
                keyword_matches: article
                    .keywords
                    .iter()
                    .filter(|k| normalized.contains(k.as_str()))
                    .count(),
            })
            .collect();

        // `sort_by` is stable, which the tie-break relies on.
        scored.sort_by(|a, b| {
            b.keyword_matches
                .cmp(&a.keyword_matches)
                .then_with(|| {
                    b.article
                        .confidence
                        .partial_cmp(&a.article.confidence)
                        .unwrap_or(Ordering::Equal)
                })
        });

        scored
    }

    /// The top-ranked article, or `None` when nothing shares a keyword with
    /// `text`.
    pub fn best_match(&self, text: &str) -> Option<&KnowledgeArticle> {
        let best = self.rank(text).into_iter().next()?;
        if best.keyword_matches == 0 {
            tracing::debug!("No knowledge article matched");
            return None;
        }
        tracing::debug!(
            article_id = %best.article.id,
            keyword_matches = best.keyword_matches,
            "Knowledge article matched"
        );
        Some(best.article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, keywords: &[&str], confidence: f64) -> KnowledgeArticle {
        KnowledgeArticle {
            id: id.into(),
            title: id.to_uppercase(),
            summary: String::new(),
            response: format!("response {id}"),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            last_updated: None,
            confidence,
        }
    }

    fn matcher(articles: Vec<KnowledgeArticle>) -> KeywordMatcher {
        KeywordMatcher::new(KnowledgeStore::new(articles).unwrap())
    }

    fn pulsecare() -> KeywordMatcher {
        matcher(vec![
            article("kb-101", &["offline", "sensor", "Wi-Fi", "diagnostic"], 0.92),
            article("kb-204", &["subscription", "billing", "payment", "grace"], 0.87),
            article("kb-312", &["replacement", "shipping", "premium", "metro"], 0.95),
        ])
    }

    #[test]
    fn ranks_by_matches_then_confidence() {
        let m = matcher(vec![
            article("two", &["alpha", "beta"], 0.5),
            article("one-high", &["alpha"], 0.9),
            article("one-low", &["beta"], 0.6),
            article("zero", &["gamma"], 0.99),
        ]);

        let ranked = m.rank("alpha beta");
        let order: Vec<(&str, usize)> = ranked
            .iter()
            .map(|s| (s.article.id.as_str(), s.keyword_matches))
            .collect();
        assert_eq!(
            order,
            vec![("two", 2), ("one-high", 1), ("one-low", 1), ("zero", 0)]
        );
        assert_eq!(m.best_match("alpha beta").unwrap().id, "two");
    }

    #[test]
    fn no_overlap_is_no_match() {
        let m = matcher(vec![
            article("a", &["alpha"], 0.5),
            article("z", &["omega"], 0.99),
        ]);
        assert!(m.best_match("nothing in common").is_none());
    }

    #[test]
    fn equal_scores_keep_store_order() {
        let m = matcher(vec![
            article("first", &["shared"], 0.7),
            article("second", &["shared"], 0.7),
        ]);
        assert_eq!(m.best_match("shared").unwrap().id, "first");

        let reversed = matcher(vec![
            article("second", &["shared"], 0.7),
            article("first", &["shared"], 0.7),
        ]);
        assert_eq!(reversed.best_match("shared").unwrap().id, "second");
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let m = matcher(vec![
            article("repeat", &["sensor"], 0.5),
            article("pair", &["sensor", "offline"], 0.1),
        ]);
        let ranked = m.rank("sensor sensor sensor offline");
        assert_eq!(ranked[0].article.id, "pair");
        assert_eq!(ranked[0].keyword_matches, 2);
        assert_eq!(ranked[1].keyword_matches, 1);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let m = pulsecare();
        // "diagnostic" is a substring of "DIAGNOSTICS"
        let best = m.best_match("Running DIAGNOSTICS now").unwrap();
        assert_eq!(best.id, "kb-101");
    }

    #[test]
    fn sensor_offline_scenario_picks_kb_101() {
        let m = pulsecare();
        let ranked = m.rank("sensor offline red LED Wi-Fi");
        assert_eq!(ranked[0].article.id, "kb-101");
        assert_eq!(ranked[0].keyword_matches, 3);
        assert!(ranked[1..].iter().all(|s| s.keyword_matches <= 1));
    }

    #[test]
    fn best_match_is_deterministic() {
        let m = pulsecare();
        let text = "premium replacement shipping for billing";
        let first = m.best_match(text).map(|a| a.id.clone());
        for _ in 0..10 {
            assert_eq!(m.best_match(text).map(|a| a.id.clone()), first);
        }
        assert_eq!(first.as_deref(), Some("kb-312"));
    }

    #[test]
    fn empty_store_never_matches() {
        let m = matcher(vec![]);
        assert!(m.rank("sensor").is_empty());
        assert!(m.best_match("sensor").is_none());
    }
}
