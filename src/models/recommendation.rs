use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cuisine, Difficulty, MealType, Recipe};

/// Which strategy produced a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Content,
    Collaborative,
    Hybrid,
}

/// A single recommendation produced by a strategy scorer or the merger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub recipe: Recipe,
    pub score: f32,
    #[serde(rename = "type")]
    pub strategy: Strategy,
    pub reason: String,
}

/// Request configuration for the recommendation merger
///
/// All fields are optional, but at least one of a non-empty `ingredient_ids`
/// or `include_collaborative` must be in effect.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    /// Ingredient ids used to build the content-based query
    #[serde(default)]
    pub ingredient_ids: Vec<Uuid>,

    /// Maximum number of recommendations to return
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default = "default_true")]
    pub include_content_based: bool,

    #[serde(default = "default_true")]
    pub include_collaborative: bool,

    #[serde(default = "default_true")]
    pub include_hybrid: bool,

    /// Per-serving nutrition bounds, all inclusive and AND-combined
    #[serde(default)]
    pub max_calories: Option<f32>,
    #[serde(default)]
    pub min_protein: Option<f32>,
    #[serde(default)]
    pub max_carbs: Option<f32>,
    #[serde(default)]
    pub max_fat: Option<f32>,
}

fn default_limit() -> usize {
    10
}

fn default_true() -> bool {
    true
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            ingredient_ids: Vec::new(),
            limit: default_limit(),
            include_content_based: true,
            include_collaborative: true,
            include_hybrid: true,
            max_calories: None,
            min_protein: None,
            max_carbs: None,
            max_fat: None,
        }
    }
}

impl RecommendationRequest {
    /// True when the recipe satisfies every requested nutrition bound.
    /// Ceilings pass on `value <= ceiling`, floors on `value >= floor`.
    pub fn nutrition_allows(&self, recipe: &Recipe) -> bool {
        if let Some(max) = self.max_calories {
            if recipe.calories > max {
                return false;
            }
        }
        if let Some(min) = self.min_protein {
            if recipe.protein < min {
                return false;
            }
        }
        if let Some(max) = self.max_carbs {
            if recipe.carbs > max {
                return false;
            }
        }
        if let Some(max) = self.max_fat {
            if recipe.fat > max {
                return false;
            }
        }
        true
    }

    /// True when any nutrition bound is set
    pub fn has_nutrition_filters(&self) -> bool {
        self.max_calories.is_some()
            || self.min_protein.is_some()
            || self.max_carbs.is_some()
            || self.max_fat.is_some()
    }
}

/// Optional post-scoring filters for pantry-based recommendations,
/// AND-combined
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PantryFilters {
    pub difficulty: Option<Difficulty>,
    pub cuisine: Option<Cuisine>,
    pub meal_type: Option<MealType>,
    /// Ceiling on preparation time in minutes
    pub max_prep_time: Option<u32>,
    /// Floor on average rating
    pub min_rating: Option<f32>,
    /// Recipe must share at least one tag with this list when supplied
    pub tags: Option<Vec<String>>,
}

impl PantryFilters {
    /// True when the recipe passes every supplied filter
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(difficulty) = self.difficulty {
            if recipe.difficulty != difficulty {
                return false;
            }
        }
        if let Some(cuisine) = self.cuisine {
            if recipe.cuisine != cuisine {
                return false;
            }
        }
        if let Some(meal_type) = self.meal_type {
            if recipe.meal_type != meal_type {
                return false;
            }
        }
        if let Some(max) = self.max_prep_time {
            if recipe.prep_time > max {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if recipe.average_rating < min {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            if !tags.is_empty() && !recipe.tags.iter().any(|t| tags.contains(t)) {
                return false;
            }
        }
        true
    }
}

/// Metadata about one recommendation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationMetadata {
    pub total_recommendations: usize,
    pub content_based_count: usize,
    pub collaborative_count: usize,
    pub hybrid_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl RecommendationMetadata {
    /// Metadata for an empty result set
    pub fn empty() -> Self {
        Self {
            total_recommendations: 0,
            content_based_count: 0,
            collaborative_count: 0,
            hybrid_count: 0,
            timestamp: Utc::now(),
        }
    }

    /// Tallies per-strategy counts over a final result set
    pub fn for_items(items: &[RecommendationItem]) -> Self {
        let count = |s: Strategy| items.iter().filter(|i| i.strategy == s).count();
        Self {
            total_recommendations: items.len(),
            content_based_count: count(Strategy::Content),
            collaborative_count: count(Strategy::Collaborative),
            hybrid_count: count(Strategy::Hybrid),
            timestamp: Utc::now(),
        }
    }
}

/// Response returned to the HTTP layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationItem>,
    pub metadata: RecommendationMetadata,
}

impl RecommendationResponse {
    /// A well-formed empty response; used when the scoring pipeline fails
    pub fn empty() -> Self {
        Self {
            recommendations: Vec::new(),
            metadata: RecommendationMetadata::empty(),
        }
    }
}
