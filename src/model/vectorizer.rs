use crate::corpus::Corpus;
use crate::model::tokenizer::tokenize;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};

/// Sparse vector of `(dimension, weight)` pairs sorted by dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from pairs; entries are sorted by dimension and zero weights dropped.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, weight)| weight != 0.0);
        entries.sort_unstable_by_key(|&(dim, _)| dim);
        Self { entries }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Scale to unit Euclidean length. The zero vector stays zero.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    /// Dot product by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_dim, a_w) = self.entries[i];
            let (b_dim, b_w) = other.entries[j];
            match a_dim.cmp(&b_dim) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }
}

/// TF-IDF model fitted once over a corpus.
///
/// Dimensions follow the lexicographic order of the vocabulary. Row `i` of
/// the document matrix belongs to corpus entry `i`.
#[derive(Debug, Clone, Default)]
pub struct VectorModel {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVector>,
}

impl VectorModel {
    /// Fit vocabulary, IDF weights and unit-length document rows.
    ///
    /// IDF is smoothed as if one extra document contained every term:
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit(corpus: &Corpus) -> Self {
        let counts: Vec<BTreeMap<&str, usize>> = corpus
            .iter()
            .map(|recipe| term_counts(&recipe.ingredients_clean))
            .collect();

        let terms: BTreeSet<&str> = counts.iter().flat_map(|c| c.keys().copied()).collect();
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(dim, term)| (term.to_string(), dim))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for doc in &counts {
            for term in doc.keys() {
                doc_freq[vocabulary[*term]] += 1;
            }
        }

        let n = counts.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let documents: Vec<SparseVector> = counts
            .iter()
            .map(|doc| {
                let entries = doc
                    .iter()
                    .map(|(term, &tf)| {
                        let dim = vocabulary[*term];
                        (dim, tf as f64 * idf[dim])
                    })
                    .collect();
                let mut row = SparseVector::from_entries(entries);
                row.l2_normalize();
                row
            })
            .collect();

        let empty_rows = documents.iter().filter(|row| row.is_zero()).count();
        if empty_rows > 0 {
            debug!("{} recipes contain only stop words and can never match", empty_rows);
        }

        info!(
            "Vector model fitted: {} documents, {} terms",
            documents.len(),
            vocabulary.len()
        );

        Self {
            vocabulary,
            idf,
            documents,
        }
    }

    /// Map a normalized query into the fitted space.
    ///
    /// Unknown tokens are ignored; stored IDF weights are used as-is.
    pub fn transform(&self, normalized_query: &str) -> SparseVector {
        let mut tf: HashMap<usize, usize> = HashMap::new();
        for token in tokenize(normalized_query) {
            if let Some(&dim) = self.vocabulary.get(token) {
                *tf.entry(dim).or_insert(0) += 1;
            }
        }

        let entries = tf
            .into_iter()
            .map(|(dim, count)| (dim, count as f64 * self.idf[dim]))
            .collect();

        let mut vector = SparseVector::from_entries(entries);
        vector.l2_normalize();
        vector
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn num_documents(&self) -> usize {
        self.documents.len()
    }

    pub fn dimension(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.dimension(term).map(|dim| self.idf[dim])
    }

    pub fn document(&self, index: usize) -> Option<&SparseVector> {
        self.documents.get(index)
    }

    pub fn documents(&self) -> &[SparseVector] {
        &self.documents
    }
}

fn term_counts(text: &str) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::RawRecipeRow;

    const EPS: f64 = 1e-9;

    fn corpus(rows: &[(&str, &str)]) -> Corpus {
        Corpus::load(rows.iter().map(|(n, i)| RawRecipeRow::new(*n, *i)))
    }

    #[test]
    fn test_vocabulary_is_sorted_and_excludes_stop_words() {
        let model = VectorModel::fit(&corpus(&[
            ("Tomato Soup", "tomato, onion, garlic"),
            ("Garlic Bread", "garlic, butter and bread"),
        ]));

        assert_eq!(model.vocabulary_size(), 5);
        assert_eq!(model.dimension("bread"), Some(0));
        assert_eq!(model.dimension("tomato"), Some(4));
        assert_eq!(model.dimension("and"), None);
    }

    #[test]
    fn test_smoothed_idf() {
        let model = VectorModel::fit(&corpus(&[
            ("Tomato Soup", "tomato, onion, garlic"),
            ("Garlic Bread", "garlic, butter, bread"),
        ]));

        // Present in both documents
        assert!((model.idf("garlic").unwrap() - 1.0).abs() < EPS);
        // Present in one of two
        let expected = (3.0f64 / 2.0).ln() + 1.0;
        assert!((model.idf("tomato").unwrap() - expected).abs() < EPS);
        assert!(model.idf("tomato").unwrap() > model.idf("garlic").unwrap());
    }

    #[test]
    fn test_document_rows_are_unit_length() {
        let model = VectorModel::fit(&corpus(&[
            ("A", "flour, sugar, butter, butter"),
            ("B", "flour, eggs"),
            ("C", "rice"),
        ]));

        for row in model.documents() {
            assert!((row.norm() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_term_frequency_counts_repeats() {
        let model = VectorModel::fit(&corpus(&[("A", "butter, butter, flour"), ("B", "flour")]));

        let row = model.document(0).unwrap();
        let butter = model.dimension("butter").unwrap();
        let flour = model.dimension("flour").unwrap();
        let weight = |dim: usize| row.entries().iter().find(|(d, _)| *d == dim).unwrap().1;

        assert!(weight(butter) > weight(flour));
    }

    #[test]
    fn test_stop_word_only_document_has_zero_row() {
        let model = VectorModel::fit(&corpus(&[("Odd", "the, and, with"), ("Real", "rice")]));
        assert!(model.document(0).unwrap().is_zero());
        assert!(!model.document(1).unwrap().is_zero());
    }

    #[test]
    fn test_transform_matches_fitted_row() {
        let model = VectorModel::fit(&corpus(&[
            ("Tomato Soup", "tomato, onion, garlic"),
            ("Garlic Bread", "garlic, butter, bread"),
        ]));

        let query = model.transform("tomato onion garlic");
        assert_eq!(&query, model.document(0).unwrap());
        assert!((query.dot(model.document(0).unwrap()) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_transform_ignores_unknown_tokens() {
        let model = VectorModel::fit(&corpus(&[("Toast", "bread, butter")]));

        assert!(model.transform("saffron truffle").is_zero());
        assert!(model.transform("").is_zero());
        assert_eq!(model.transform("bread saffron").nnz(), 1);
    }

    #[test]
    fn test_empty_corpus() {
        let model = VectorModel::fit(&Corpus::empty());
        assert_eq!(model.vocabulary_size(), 0);
        assert_eq!(model.num_documents(), 0);
        assert!(model.transform("garlic").is_zero());
    }

    #[test]
    fn test_sparse_dot() {
        let a = SparseVector::from_entries(vec![(3, 2.0), (0, 1.0)]);
        let b = SparseVector::from_entries(vec![(0, 4.0), (2, 5.0), (3, 0.5)]);
        assert!((a.dot(&b) - 5.0).abs() < EPS);
        assert_eq!(a.dot(&SparseVector::zero()), 0.0);
    }
}
