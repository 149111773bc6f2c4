use std::collections::HashSet;

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{PantryFilters, Recipe, RecommendationItem, Strategy},
    services::{embeddings::EmbeddingStore, lexical::LexicalIndex, safety, similarity},
    stores::CatalogStore,
};

/// Base score for the top collaborative recommendation
const COLLABORATIVE_BASE_SCORE: f32 = 0.8;
/// Score decrement per rank position
const COLLABORATIVE_RANK_STEP: f32 = 0.1;
/// Floor so over-fetched lists never score negative
const COLLABORATIVE_MIN_SCORE: f32 = 0.05;

/// Streams every recipe from the catalog in fixed-size batches
async fn stream_all_recipes(
    catalog: &dyn CatalogStore,
    batch_size: usize,
) -> AppResult<Vec<Recipe>> {
    let mut recipes = Vec::new();
    let mut offset = 0;
    loop {
        let batch = catalog.list_recipes(offset, batch_size).await?;
        if batch.is_empty() {
            break;
        }
        offset += batch.len();
        recipes.extend(batch);
    }
    Ok(recipes)
}

fn sort_by_score_then_rating(items: &mut [(Recipe, f32)]) {
    items.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.0.average_rating
                    .partial_cmp(&a.0.average_rating)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
}

/// Content-based scorer: TF-IDF similarity between a query built from the
/// requested ingredients and each recipe's document vector.
///
/// Unknown ingredient ids shrink the query rather than erroring; zero
/// similarity means no lexical overlap, so such recipes are dropped rather
/// than ranked last.
pub async fn content_recommendations(
    catalog: &dyn CatalogStore,
    index: &LexicalIndex,
    batch_size: usize,
    ingredient_ids: &[Uuid],
    limit: usize,
    exclude: &HashSet<Uuid>,
) -> AppResult<Vec<RecommendationItem>> {
    let ingredients = catalog.find_ingredients_by_ids(ingredient_ids).await?;
    if ingredients.is_empty() {
        tracing::debug!("No ingredients resolved for content query");
        return Ok(Vec::new());
    }

    let ingredient_names: Vec<String> = ingredients.iter().map(|i| i.name.clone()).collect();
    let query_text = ingredient_names.join(" ");
    let query_vector = index.vector_for(&query_text);

    let mut scored: Vec<(Recipe, f32)> = Vec::new();
    for recipe in stream_all_recipes(catalog, batch_size).await? {
        if exclude.contains(&recipe.id) {
            continue;
        }
        let Some(recipe_vector) = index.recipe_vector(&recipe.id) else {
            continue;
        };
        let score = index.similarity(&query_vector, recipe_vector);
        if score > 0.0 {
            scored.push((recipe, score));
        }
    }

    sort_by_score_then_rating(&mut scored);
    scored.truncate(limit);

    let reason = format!("Similar to ingredients: {}", ingredient_names.join(", "));
    Ok(scored
        .into_iter()
        .map(|(recipe, score)| RecommendationItem {
            recipe,
            score,
            strategy: Strategy::Content,
            reason: reason.clone(),
        })
        .collect())
}

/// Collaborative scorer.
///
/// Placeholder for a real collaborative-filtering model: ranks by stored
/// rating and review count and assigns a synthetic score that decreases with
/// rank position. Not production-grade personalization.
pub async fn collaborative_recommendations(
    catalog: &dyn CatalogStore,
    limit: usize,
    exclude: &HashSet<Uuid>,
) -> AppResult<Vec<RecommendationItem>> {
    let exclude_ids: Vec<Uuid> = exclude.iter().copied().collect();
    let popular = catalog.find_recipes_excluding(&exclude_ids, limit).await?;

    Ok(popular
        .into_iter()
        .enumerate()
        .map(|(rank, recipe)| RecommendationItem {
            recipe,
            score: (COLLABORATIVE_BASE_SCORE - COLLABORATIVE_RANK_STEP * rank as f32)
                .max(COLLABORATIVE_MIN_SCORE),
            strategy: Strategy::Collaborative,
            reason: "Popular among users with similar tastes".to_string(),
        })
        .collect())
}

/// Embedding-based pantry scorer.
///
/// A recipe's score is the mean, over its ingredients with known embeddings,
/// of the best cosine similarity to any pantry ingredient embedding.
/// Ingredients without an embedding are skipped on both sides; if either
/// side ends up empty the recipe scores 0. Recipes failing the safety filter
/// or any supplied post-filter are removed entirely.
#[allow(clippy::too_many_arguments)]
pub async fn pantry_recommendations(
    catalog: &dyn CatalogStore,
    embeddings: &EmbeddingStore,
    batch_size: usize,
    pantry_ingredients: &[String],
    normalized_allergens: &[String],
    filters: &PantryFilters,
    limit: usize,
    exclude: &HashSet<Uuid>,
) -> AppResult<Vec<RecommendationItem>> {
    let mut pantry_vectors: Vec<&[f32]> = Vec::new();
    for name in pantry_ingredients {
        if let Some(vector) = embeddings.lookup(name).await? {
            pantry_vectors.push(vector);
        }
    }
    if pantry_vectors.is_empty() {
        tracing::warn!("No pantry ingredient embeddings found; scores will be zero");
    }

    let mut scored: Vec<(Recipe, f32)> = Vec::new();
    for recipe in stream_all_recipes(catalog, batch_size).await? {
        if exclude.contains(&recipe.id) {
            continue;
        }
        if !safety::is_safe(&recipe.ingredient_names(), normalized_allergens) {
            tracing::debug!(recipe = %recipe.title, "Removed by safety filter");
            continue;
        }
        if !filters.matches(&recipe) {
            continue;
        }

        let mut recipe_vectors: Vec<&[f32]> = Vec::new();
        for ingredient in &recipe.ingredients {
            if let Some(vector) = embeddings.lookup(&ingredient.name).await? {
                recipe_vectors.push(vector);
            }
        }

        let score = if recipe_vectors.is_empty() || pantry_vectors.is_empty() {
            0.0
        } else {
            let total: f32 = recipe_vectors
                .iter()
                .map(|&recipe_vector| {
                    pantry_vectors
                        .iter()
                        .map(|&pantry_vector| {
                            similarity::cosine_similarity(pantry_vector, recipe_vector)
                        })
                        .fold(0.0, f32::max)
                })
                .sum();
            total / recipe_vectors.len() as f32
        };

        scored.push((recipe, score));
    }

    sort_by_score_then_rating(&mut scored);
    scored.truncate(limit);

    Ok(scored
        .into_iter()
        .map(|(recipe, score)| RecommendationItem {
            recipe,
            score,
            strategy: Strategy::Content,
            reason: "Uses ingredients similar to your pantry".to_string(),
        })
        .collect())
}
