use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of an ingredient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Vegetable,
    Fruit,
    Meat,
    Seafood,
    Dairy,
    Grain,
    Legume,
    Nut,
    Seed,
    Herb,
    Spice,
    Condiment,
    Oil,
    Sweetener,
    Baking,
    Beverage,
    Other,
}

/// An ingredient in the catalog
///
/// Names are canonical and unique (case-insensitive); nutrition facts are
/// per 100g. Read-only from the recommender's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub category: IngredientCategory,
    #[serde(default)]
    pub description: Option<String>,
    pub calories: f32,
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
}

impl Ingredient {
    /// Creates a new ingredient with zeroed nutrition facts
    pub fn new(name: impl Into<String>, category: IngredientCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            description: None,
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
        }
    }
}
