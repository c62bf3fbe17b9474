use crate::corpus::models::{Corpus, RawRecipeRow};
use crate::error::Result;
use std::path::Path;
use tracing::{debug, info, warn};

const NAME_COLUMNS: [&str; 2] = ["name", "Name"];
const INGREDIENT_COLUMNS: [&str; 2] = ["ingredients", "RecipeIngredientParts"];

/// Load a corpus from a file, degrading to an empty corpus on failure.
///
/// An unreadable source is logged and treated as "no recipes", so callers
/// keep running and every query simply finds nothing.
pub fn load_path(path: impl AsRef<Path>) -> Corpus {
    let path = path.as_ref();

    match try_load_path(path) {
        Ok(corpus) => corpus,
        Err(e) => {
            warn!(
                "Failed to load corpus from {:?}: {}; continuing with an empty corpus",
                path,
                e.log_safe()
            );
            Corpus::empty()
        }
    }
}

/// Load a corpus from a CSV or JSON file.
///
/// Files ending in `.json` are read as an array of row objects; anything else
/// is read as CSV with a header row.
pub fn try_load_path(path: impl AsRef<Path>) -> Result<Corpus> {
    let path = path.as_ref();
    info!("Loading recipe corpus from {:?}", path);

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let content = std::fs::read_to_string(path)?;
        from_json_str(&content)
    } else {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)?;
        from_csv_reader(reader)
    }
}

/// Read CSV rows from any reader
pub fn from_csv<R: std::io::Read>(source: R) -> Result<Corpus> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    from_csv_reader(reader)
}

fn from_csv_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Corpus> {
    let headers = reader.headers()?.clone();

    let has_name = headers.iter().any(|h| NAME_COLUMNS.contains(&h));
    let has_ingredients = headers.iter().any(|h| INGREDIENT_COLUMNS.contains(&h));
    if !has_name || !has_ingredients {
        warn!(
            "Corpus header is missing a name or ingredients column (found: {:?})",
            headers.iter().collect::<Vec<_>>()
        );
    }

    let rows = reader
        .deserialize::<RawRecipeRow>()
        .enumerate()
        .map(|(line, row)| match row {
            Ok(row) => Some(row),
            Err(e) => {
                debug!("Skipping malformed CSV row {}: {}", line + 2, e);
                None
            }
        });

    Ok(Corpus::from_rows(rows))
}

/// Read a JSON array of row objects
pub fn from_json_str(content: &str) -> Result<Corpus> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)?;

    let rows = values.into_iter().enumerate().map(|(i, value)| {
        match serde_json::from_value::<RawRecipeRow>(value) {
            Ok(row) => Some(row),
            Err(e) => {
                debug!("Skipping malformed JSON row {}: {}", i, e);
                None
            }
        }
    });

    Ok(Corpus::from_rows(rows))
}
