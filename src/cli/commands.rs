use crate::api::models::{RecipeMatch, RecommendResponse};
use crate::recommender::Recommender;
use crate::utils::text::{format_score, preview};
use crate::{Error, Result};
use reqwest::Client;
use std::fmt::Write;
use url::Url;

/// Characters of the ingredient list shown per result
const INGREDIENT_PREVIEW_CHARS: usize = 120;

/// Recommend against a locally fitted recommender and print the results
pub fn recommend(recommender: &Recommender, ingredients: &str, top_n: Option<usize>) -> Result<()> {
    let ingredients = require_ingredients(ingredients)?;

    let results: Vec<RecipeMatch> = recommender
        .recommend(ingredients, top_n)
        .into_iter()
        .enumerate()
        .map(|(position, result)| RecipeMatch::from_ranked(position, result))
        .collect();

    print!("{}", format_results(&results));
    Ok(())
}

/// Recommend via a running server and print the results
pub async fn recommend_remote(
    server_url: &str,
    ingredients: &str,
    top_n: Option<usize>,
) -> Result<()> {
    let ingredients = require_ingredients(ingredients)?;
    let response = fetch_recommendations(server_url, ingredients, top_n).await?;

    print!("{}", format_results(&response.results));
    Ok(())
}

/// Call `GET /api/recommend` on a server
pub async fn fetch_recommendations(
    server_url: &str,
    ingredients: &str,
    top_n: Option<usize>,
) -> Result<RecommendResponse> {
    let mut url = Url::parse(server_url)?.join("/api/recommend")?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("ingredients", ingredients);
        if let Some(top_n) = top_n {
            query.append_pair("top_n", &top_n.to_string());
        }
    }

    let response = Client::new().get(url).send().await?;
    let response = response.error_for_status()?;

    Ok(response.json().await?)
}

/// Print corpus and model statistics
pub fn inspect(recommender: &Recommender) -> Result<()> {
    let stats = recommender.stats();

    println!("Rows read:        {}", stats.load.rows_read);
    println!("Rows dropped:     {}", stats.load.rows_dropped);
    println!("Recipes:          {}", stats.recipes);
    println!("Vocabulary size:  {}", stats.vocabulary_size);
    println!("Threshold:        {}", stats.similarity_threshold);
    println!("Default top-n:    {}", stats.default_top_n);

    Ok(())
}

fn require_ingredients(ingredients: &str) -> Result<&str> {
    let trimmed = ingredients.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(
            "Please enter some ingredients!".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Render results as a numbered listing
pub fn format_results(results: &[RecipeMatch]) -> String {
    let mut out = String::new();

    if results.is_empty() {
        out.push_str("No recipes found! Try different ingredients.\n");
        out.push_str("Tip: Use common words like 'chicken', 'tomato', 'onion', 'garlic'\n");
        return out;
    }

    // Writing into a String cannot fail
    let _ = writeln!(out, "Top {} Recommended Recipes:\n", results.len());
    for result in results {
        let _ = writeln!(out, "{}. {}", result.rank, result.name);
        let _ = writeln!(
            out,
            "   Ingredients: {}",
            preview(&result.ingredients, INGREDIENT_PREVIEW_CHARS)
        );
        let _ = writeln!(
            out,
            "   Similarity Score: {}",
            format_score(result.similarity_score)
        );
        let _ = writeln!(out, "{}", "-".repeat(80));
    }

    out
}
