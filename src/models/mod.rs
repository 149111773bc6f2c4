pub mod ingredient;
pub mod recipe;
pub mod recommendation;
pub mod user;

pub use ingredient::{Ingredient, IngredientCategory};
pub use recipe::{Cuisine, Difficulty, MealType, Recipe};
pub use recommendation::{
    PantryFilters, RecommendationItem, RecommendationMetadata, RecommendationRequest,
    RecommendationResponse, Strategy,
};
pub use user::{PantryItem, UserProfile};
