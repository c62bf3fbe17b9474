use crate::corpus::normalize::normalize;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One row of a tabular recipe source.
///
/// Both the canonical column names and the spellings used by the Food.com
/// export (`Name`, `RecipeIngredientParts`) are accepted. Other columns are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecipeRow {
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "RecipeIngredientParts")]
    pub ingredients: Option<String>,
}

impl RawRecipeRow {
    pub fn new(name: impl Into<String>, ingredients: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ingredients: Some(ingredients.into()),
        }
    }
}

/// A recipe with both required fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRecord {
    pub name: String,
    pub ingredients_raw: String,
}

impl RecipeRecord {
    /// Materialize a record, or `None` if the name or ingredients are missing.
    pub fn from_row(row: RawRecipeRow) -> Option<Self> {
        let name = row.name?.trim().to_string();
        let ingredients_raw = row.ingredients?;

        if name.is_empty() || ingredients_raw.trim().is_empty() {
            return None;
        }

        Some(Self {
            name,
            ingredients_raw,
        })
    }

    pub fn normalize(&self) -> NormalizedRecipe {
        NormalizedRecipe {
            name: self.name.clone(),
            ingredients_clean: normalize(Some(&self.ingredients_raw)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecipe {
    pub name: String,
    pub ingredients_clean: String,
}

/// Row accounting for a corpus load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

/// The fixed recipe collection recommendations are drawn from.
///
/// Positions are contiguous from 0 and double as row identities in the
/// fitted vector model, so a corpus is never mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    recipes: Vec<NormalizedRecipe>,
    stats: LoadStats,
}

impl Corpus {
    /// Build a corpus from raw rows, dropping anything unusable
    pub fn load<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRecipeRow>,
    {
        Self::from_rows(rows.into_iter().map(Some))
    }

    /// Like [`Corpus::load`], but `None` entries stand for rows the source
    /// failed to decode; they are counted as dropped.
    pub(crate) fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Option<RawRecipeRow>>,
    {
        let mut stats = LoadStats::default();
        let mut recipes = Vec::new();

        for row in rows {
            stats.rows_read += 1;

            let Some(record) = row.and_then(RecipeRecord::from_row) else {
                stats.rows_dropped += 1;
                continue;
            };

            let recipe = record.normalize();
            if recipe.ingredients_clean.is_empty() {
                debug!("Dropping recipe with no usable ingredients: {}", recipe.name);
                stats.rows_dropped += 1;
                continue;
            }

            recipes.push(recipe);
        }

        stats.rows_kept = recipes.len();

        info!(
            "Corpus loaded: {} recipes kept, {} rows dropped",
            stats.rows_kept, stats.rows_dropped
        );

        Self { recipes, stats }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NormalizedRecipe> {
        self.recipes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedRecipe> {
        self.recipes.iter()
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a NormalizedRecipe;
    type IntoIter = std::slice::Iter<'a, NormalizedRecipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}
