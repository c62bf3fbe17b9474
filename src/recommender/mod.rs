// Recommendation pipeline: normalize -> transform -> rank

pub mod ranker;

use crate::config::{RecommenderConfig, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_N};
use crate::corpus::{normalize, Corpus, LoadStats};
use crate::model::VectorModel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

pub use ranker::{rank, RankedResult};

/// Summary of a fitted recommender
#[derive(Debug, Clone, Serialize)]
pub struct ModelStats {
    pub recipes: usize,
    pub vocabulary_size: usize,
    pub similarity_threshold: f64,
    pub default_top_n: usize,
    pub load: LoadStats,
    pub fitted_at: DateTime<Utc>,
}

/// Fitted, read-only recommender over a fixed corpus.
///
/// Only obtainable through [`RecommenderBuilder::build`], so a query can
/// never run against an unfitted model. Shared across requests behind an
/// `Arc`; every query only borrows `&self`.
#[derive(Debug)]
pub struct Recommender {
    corpus: Corpus,
    model: VectorModel,
    similarity_threshold: f64,
    default_top_n: usize,
    fitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RecommenderBuilder {
    similarity_threshold: f64,
    default_top_n: usize,
}

impl Default for RecommenderBuilder {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl RecommenderBuilder {
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn default_top_n(mut self, top_n: usize) -> Self {
        self.default_top_n = top_n;
        self
    }

    pub fn with_config(self, config: &RecommenderConfig) -> Self {
        self.threshold(config.similarity_threshold)
            .default_top_n(config.default_top_n)
    }

    /// Fit the vector model and take ownership of the corpus
    pub fn build(self, corpus: Corpus) -> Recommender {
        let started = Instant::now();
        let model = VectorModel::fit(&corpus);

        info!(
            "Recommender ready: {} recipes, {} terms (fit took {:?})",
            corpus.len(),
            model.vocabulary_size(),
            started.elapsed()
        );

        Recommender {
            corpus,
            model,
            similarity_threshold: self.similarity_threshold,
            default_top_n: self.default_top_n,
            fitted_at: Utc::now(),
        }
    }
}

impl Recommender {
    pub fn builder() -> RecommenderBuilder {
        RecommenderBuilder::default()
    }

    /// Recommend recipes for a comma-separated ingredient list.
    ///
    /// `None` for `top_n` uses the configured default. An empty list means
    /// nothing matched.
    pub fn recommend(&self, ingredients: &str, top_n: Option<usize>) -> Vec<RankedResult> {
        let top_n = top_n.unwrap_or(self.default_top_n);
        let normalized = normalize(Some(ingredients));
        let query = self.model.transform(&normalized);

        let results = rank(
            &self.model,
            &self.corpus,
            &query,
            top_n,
            self.similarity_threshold,
        );

        debug!(
            "Query {:?} matched {} terms, returned {} results",
            normalized,
            query.nnz(),
            results.len()
        );

        results
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn model(&self) -> &VectorModel {
        &self.model
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            recipes: self.corpus.len(),
            vocabulary_size: self.model.vocabulary_size(),
            similarity_threshold: self.similarity_threshold,
            default_top_n: self.default_top_n,
            load: self.corpus.stats(),
            fitted_at: self.fitted_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RawRecipeRow;

    fn recommender(rows: &[(&str, &str)]) -> Recommender {
        let corpus = Corpus::load(rows.iter().map(|(n, i)| RawRecipeRow::new(*n, *i)));
        Recommender::builder().build(corpus)
    }

    #[test]
    fn test_query_is_normalized_like_corpus() {
        let rec = recommender(&[
            ("Tomato Soup", r#"c("Tomato", "Onion", "Garlic")"#),
            ("Garlic Bread", r#"c("Garlic", "Butter", "Bread")"#),
        ]);

        let results = rec.recommend("  GARLIC , 'Tomato' ", None);
        assert_eq!(results[0].name, "Tomato Soup");
        assert_eq!(results[1].name, "Garlic Bread");
    }

    #[test]
    fn test_default_top_n_applies() {
        let rows: Vec<(String, String)> = (0..15)
            .map(|i| (format!("Egg Dish {i}"), format!("eggs, extra{i}")))
            .collect();
        let corpus = Corpus::load(rows.iter().map(|(n, i)| RawRecipeRow::new(n, i)));
        let rec = Recommender::builder().build(corpus);

        assert_eq!(rec.recommend("eggs", None).len(), 10);
        assert_eq!(rec.recommend("eggs", Some(3)).len(), 3);
        assert_eq!(rec.recommend("eggs", Some(50)).len(), 15);
    }

    #[test]
    fn test_builder_overrides() {
        let corpus = Corpus::load(vec![
            RawRecipeRow::new("A", "rice, beans"),
            RawRecipeRow::new("B", "rice"),
        ]);
        let rec = Recommender::builder()
            .threshold(0.99)
            .default_top_n(1)
            .build(corpus);

        let results = rec.recommend("rice", None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "B");

        let stats = rec.stats();
        assert_eq!(stats.default_top_n, 1);
        assert_eq!(stats.similarity_threshold, 0.99);
    }

    #[test]
    fn test_stats() {
        let rec = recommender(&[("Toast", "bread, butter"), ("Nothing", "")]);
        let stats = rec.stats();

        assert_eq!(stats.recipes, 1);
        assert_eq!(stats.vocabulary_size, 2);
        assert_eq!(stats.load.rows_dropped, 1);
    }

    #[test]
    fn test_recommender_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recommender>();
    }
}
