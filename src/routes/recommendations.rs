use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Cuisine, Difficulty, MealType, PantryFilters, RecommendationItem, RecommendationRequest, RecommendationResponse},
    state::AppState,
};

/// Handler for merged (content/collaborative/hybrid) recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let response = state.engine.get_recommendations(user_id, request).await?;
    Ok(Json(response))
}

/// Query parameters for pantry-based recommendations; `tags` is
/// comma-separated
#[derive(Debug, Deserialize)]
pub struct PantryQuery {
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<Cuisine>,
    pub meal_type: Option<MealType>,
    pub max_prep_time: Option<u32>,
    pub min_rating: Option<f32>,
    pub tags: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

impl PantryQuery {
    fn into_filters(self) -> (PantryFilters, usize) {
        let tags = self.tags.map(|raw| {
            raw.split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        });
        let filters = PantryFilters {
            difficulty: self.difficulty,
            cuisine: self.cuisine,
            meal_type: self.meal_type,
            max_prep_time: self.max_prep_time,
            min_rating: self.min_rating,
            tags,
        };
        (filters, self.limit)
    }
}

/// Handler for embedding-based pantry recommendations
pub async fn recommend_from_pantry(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PantryQuery>,
) -> AppResult<Json<Vec<RecommendationItem>>> {
    let (filters, limit) = query.into_filters();
    let items = state
        .engine
        .get_pantry_recommendations(user_id, filters, limit)
        .await?;
    Ok(Json(items))
}
