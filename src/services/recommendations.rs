use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        PantryFilters, RecommendationItem, RecommendationMetadata, RecommendationRequest,
        RecommendationResponse, Strategy, UserProfile,
    },
    services::{embeddings::EmbeddingStore, lexical::LexicalIndex, safety, scoring},
    stores::{CatalogStore, UserStore},
};

/// Orchestrates the strategy scorers and merges their output
///
/// Owned by the composition root and shared by handle; the embedding table
/// and lexical index are built at most once (behind `OnceCell`s) and
/// read-only afterwards, so concurrent requests need no synchronization.
pub struct RecommendationEngine {
    catalog: Arc<dyn CatalogStore>,
    users: Arc<dyn UserStore>,
    embeddings: EmbeddingStore,
    index: OnceCell<LexicalIndex>,
    batch_size: usize,
}

impl RecommendationEngine {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        users: Arc<dyn UserStore>,
        embeddings: EmbeddingStore,
        batch_size: usize,
    ) -> Self {
        Self {
            catalog,
            users,
            embeddings,
            index: OnceCell::new(),
            batch_size,
        }
    }

    /// Startup hook: loads the embedding artifact and builds the lexical
    /// index so no request pays for construction. Both builds are also
    /// guarded lazily, so calling this is an optimization, not a
    /// correctness requirement.
    pub async fn warm_up(&self) -> AppResult<()> {
        self.embeddings.load().await?;
        let index = self.index().await?;
        tracing::info!(
            document_count = index.len(),
            embedding_count = self.embeddings.len().await?,
            "Recommendation engine ready"
        );
        Ok(())
    }

    async fn index(&self) -> AppResult<&LexicalIndex> {
        self.index
            .get_or_try_init(|| LexicalIndex::build(self.catalog.as_ref(), self.batch_size))
            .await
    }

    async fn resolve_user(&self, user_id: Uuid) -> AppResult<UserProfile> {
        self.users
            .find_user_with_pantry_and_likes(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    /// Runs the configured strategies for a user and returns a merged,
    /// filtered, de-duplicated ranking.
    ///
    /// Validation and user resolution surface errors to the caller; any
    /// failure inside the scoring pipeline itself is logged and converted
    /// into an empty, well-formed response.
    pub async fn get_recommendations(
        &self,
        user_id: Uuid,
        request: RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        if request.ingredient_ids.is_empty() && !request.include_collaborative {
            return Err(AppError::Validation(
                "Provide ingredient_ids or enable collaborative filtering".to_string(),
            ));
        }

        let user = self.resolve_user(user_id).await?;
        let exclude: HashSet<Uuid> = user.liked_recipe_ids.iter().copied().collect();

        match self.score(&request, &exclude).await {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::error!(error = %e, user_id = %user_id, "Recommendation scoring failed");
                Ok(RecommendationResponse::empty())
            }
        }
    }

    async fn score(
        &self,
        request: &RecommendationRequest,
        exclude: &HashSet<Uuid>,
    ) -> AppResult<RecommendationResponse> {
        // Over-fetch to survive the nutrition filter and de-duplication;
        // limit is caller-supplied, so the multiply must not overflow
        let fetch_limit = request.limit.saturating_mul(2);

        let run_content = request.include_content_based && !request.ingredient_ids.is_empty();

        let (content, collaborative) = tokio::join!(
            async {
                if run_content {
                    let index = self.index().await?;
                    scoring::content_recommendations(
                        self.catalog.as_ref(),
                        index,
                        self.batch_size,
                        &request.ingredient_ids,
                        fetch_limit,
                        exclude,
                    )
                    .await
                } else {
                    Ok(Vec::new())
                }
            },
            async {
                if request.include_collaborative {
                    scoring::collaborative_recommendations(
                        self.catalog.as_ref(),
                        fetch_limit,
                        exclude,
                    )
                    .await
                } else {
                    Ok(Vec::new())
                }
            },
        );
        let (content, collaborative) = (content?, collaborative?);

        tracing::debug!(
            content_count = content.len(),
            collaborative_count = collaborative.len(),
            "Strategy scorers finished"
        );

        let hybrid = if request.include_hybrid && !(content.is_empty() && collaborative.is_empty())
        {
            merge_hybrid(content.clone(), collaborative.clone(), fetch_limit)
        } else {
            Vec::new()
        };

        let mut working: Vec<RecommendationItem> = if request.include_hybrid && !hybrid.is_empty() {
            hybrid
        } else {
            let mut combined = Vec::new();
            if request.include_content_based {
                combined.extend(content);
            }
            if request.include_collaborative {
                combined.extend(collaborative);
            }
            combined
        };

        if request.has_nutrition_filters() {
            working.retain(|item| request.nutrition_allows(&item.recipe));
        }

        let mut seen = HashSet::new();
        working.retain(|item| seen.insert(item.recipe.id));
        sort_items(&mut working);
        working.truncate(request.limit);

        let metadata = RecommendationMetadata::for_items(&working);
        Ok(RecommendationResponse {
            recommendations: working,
            metadata,
        })
    }

    /// Embedding-based recommendations from the user's pantry, with the
    /// user's allergens applied as a safety filter.
    pub async fn get_pantry_recommendations(
        &self,
        user_id: Uuid,
        filters: PantryFilters,
        limit: usize,
    ) -> AppResult<Vec<RecommendationItem>> {
        let user = self.resolve_user(user_id).await?;
        let allergens = safety::normalize_allergens(&user.allergens);
        let pantry = user.pantry_ingredient_names();
        let exclude: HashSet<Uuid> = user.liked_recipe_ids.iter().copied().collect();

        tracing::debug!(
            user_id = %user_id,
            pantry_count = pantry.len(),
            allergen_count = allergens.len(),
            "Scoring pantry recommendations"
        );

        scoring::pantry_recommendations(
            self.catalog.as_ref(),
            &self.embeddings,
            self.batch_size,
            &pantry,
            &allergens,
            &filters,
            limit,
            &exclude,
        )
        .await
    }
}

/// Total order for final ranking: score, then rating, then review count,
/// all descending
fn sort_items(items: &mut [RecommendationItem]) {
    items.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.recipe
                    .average_rating
                    .partial_cmp(&a.recipe.average_rating)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then(b.recipe.review_count.cmp(&a.recipe.review_count))
    });
}

/// Merges content and collaborative results by recipe identity.
///
/// A recipe present in both lists gets the arithmetic mean of its two
/// scores and the `hybrid` tag; recipes present in one list keep their
/// original score and tag.
fn merge_hybrid(
    content: Vec<RecommendationItem>,
    collaborative: Vec<RecommendationItem>,
    limit: usize,
) -> Vec<RecommendationItem> {
    let mut merged: HashMap<Uuid, RecommendationItem> = HashMap::new();

    for item in content.into_iter().chain(collaborative) {
        match merged.get_mut(&item.recipe.id) {
            Some(existing) => {
                existing.score = (existing.score + item.score) / 2.0;
                existing.strategy = Strategy::Hybrid;
            }
            None => {
                merged.insert(item.recipe.id, item);
            }
        }
    }

    let mut items: Vec<RecommendationItem> = merged.into_values().collect();
    sort_items(&mut items);
    items.truncate(limit);
    items
}
