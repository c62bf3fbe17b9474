use crate::corpus::Corpus;
use crate::model::{SparseVector, VectorModel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Position of the recipe in the corpus
    pub index: usize,
    pub name: String,
    pub ingredients: String,
    pub similarity_score: f64,
}

/// Score every document against `query` and keep the best `top_n`.
///
/// Scores at or below `threshold` are dropped. Ordering is by score
/// descending, then corpus index ascending.
pub fn rank(
    model: &VectorModel,
    corpus: &Corpus,
    query: &SparseVector,
    top_n: usize,
    threshold: f64,
) -> Vec<RankedResult> {
    if query.is_zero() || top_n == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(usize, f64)> = model
        .documents()
        .iter()
        .enumerate()
        .map(|(index, row)| (index, query.dot(row).clamp(0.0, 1.0)))
        .filter(|&(_, score)| score > threshold)
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(top_n);

    scored
        .into_iter()
        .filter_map(|(index, similarity_score)| {
            let recipe = corpus.get(index)?;
            Some(RankedResult {
                index,
                name: recipe.name.clone(),
                ingredients: recipe.ingredients_clean.clone(),
                similarity_score,
            })
        })
        .collect()
}
