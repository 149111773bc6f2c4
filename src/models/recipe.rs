use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Ingredient;

/// Difficulty level of a recipe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Cuisine of a recipe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    Italian,
    Mexican,
    Indian,
    Chinese,
    Japanese,
    American,
    Mediterranean,
    Thai,
    French,
    Other,
}

/// Meal type of a recipe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
    Appetizer,
    Beverage,
}

/// A recipe in the catalog
///
/// Nutrition facts are per serving. Recipes are created by the catalog
/// collaborator and read-only from the recommender's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub instructions: Vec<String>,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Cooking time in minutes
    pub cook_time: u32,
    pub servings: u32,
    pub cuisine: Cuisine,
    pub meal_type: MealType,
    #[serde(default)]
    pub tags: Vec<String>,
    pub average_rating: f32,
    pub review_count: u32,
    pub calories: f32,
    pub protein: f32,
    pub carbs: f32,
    pub fat: f32,
    pub fiber: f32,
    pub sugar: f32,
    pub sodium: f32,
    pub author_id: Uuid,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Concatenated text used as this recipe's lexical document:
    /// title, description, instructions, tags and ingredient names.
    pub fn document_text(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.title, &self.description];
        parts.extend(self.instructions.iter().map(String::as_str));
        parts.extend(self.tags.iter().map(String::as_str));
        parts.extend(self.ingredients.iter().map(|i| i.name.as_str()));
        parts.join(" ")
    }

    /// Names of this recipe's ingredients
    pub fn ingredient_names(&self) -> Vec<String> {
        self.ingredients.iter().map(|i| i.name.clone()).collect()
    }
}
