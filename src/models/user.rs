use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in a user's pantry
///
/// The recommender only consumes the ingredient name; quantity, unit and
/// expiry are carried for the pantry collaborator's benefit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PantryItem {
    pub ingredient_name: String,
    pub quantity: f32,
    pub unit: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub favorite: bool,
}

impl PantryItem {
    pub fn new(ingredient_name: impl Into<String>, quantity: f32, unit: impl Into<String>) -> Self {
        Self {
            ingredient_name: ingredient_name.into(),
            quantity,
            unit: unit.into(),
            expires_at: None,
            favorite: false,
        }
    }
}

/// The subset of a user the recommender needs: declared allergens (raw,
/// possibly bracket/quote-polluted strings), pantry contents and liked
/// recipe ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub pantry: Vec<PantryItem>,
    #[serde(default)]
    pub liked_recipe_ids: Vec<Uuid>,
}

impl UserProfile {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            allergens: Vec::new(),
            pantry: Vec::new(),
            liked_recipe_ids: Vec::new(),
        }
    }

    /// Lowercased names of the ingredients currently in the pantry
    pub fn pantry_ingredient_names(&self) -> Vec<String> {
        self.pantry
            .iter()
            .map(|item| item.ingredient_name.to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pantry_ingredient_names_lowercased() {
        let mut profile = UserProfile::new(Uuid::new_v4());
        profile.pantry.push(PantryItem::new("Chicken Breast", 2.0, "pieces"));
        profile.pantry.push(PantryItem::new("Broccoli", 1.0, "head"));

        assert_eq!(
            profile.pantry_ingredient_names(),
            vec!["chicken breast".to_string(), "broccoli".to_string()]
        );
    }
}
