use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Cuisine, Difficulty, Ingredient, IngredientCategory, MealType, PantryItem, Recipe,
        UserProfile,
    },
    stores::{CatalogStore, UserStore},
};

/// In-memory recipe/ingredient catalog
///
/// Insertion order is the paging order, so `list_recipes` is stable for the
/// lifetime of the store.
#[derive(Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogInner>,
}

#[derive(Default)]
struct CatalogInner {
    recipes: Vec<Recipe>,
    ingredients: HashMap<Uuid, Ingredient>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_recipe(&self, recipe: Recipe) {
        let mut inner = self.inner.write().await;
        for ingredient in &recipe.ingredients {
            inner
                .ingredients
                .entry(ingredient.id)
                .or_insert_with(|| ingredient.clone());
        }
        inner.recipes.push(recipe);
    }

    pub async fn add_ingredient(&self, ingredient: Ingredient) {
        self.inner
            .write()
            .await
            .ingredients
            .insert(ingredient.id, ingredient);
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_recipes(&self, offset: usize, limit: usize) -> AppResult<Vec<Recipe>> {
        let inner = self.inner.read().await;
        Ok(inner
            .recipes
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_ingredients_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Ingredient>> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.ingredients.get(id).cloned())
            .collect())
    }

    async fn find_recipes_excluding(
        &self,
        exclude: &[Uuid],
        limit: usize,
    ) -> AppResult<Vec<Recipe>> {
        let inner = self.inner.read().await;
        let mut recipes: Vec<Recipe> = inner
            .recipes
            .iter()
            .filter(|r| !exclude.contains(&r.id))
            .cloned()
            .collect();
        recipes.sort_by(|a, b| {
            b.average_rating
                .partial_cmp(&a.average_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.review_count.cmp(&a.review_count))
        });
        recipes.truncate(limit);
        Ok(recipes)
    }
}

/// In-memory user profile store
#[derive(Default)]
pub struct InMemoryUsers {
    users: RwLock<HashMap<Uuid, UserProfile>>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, profile: UserProfile) {
        self.users.write().await.insert(profile.id, profile);
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUsers {
    async fn find_user_with_pantry_and_likes(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<UserProfile>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }
}

fn ingredient(
    name: &str,
    category: IngredientCategory,
    calories: f32,
    protein: f32,
    carbs: f32,
    fat: f32,
) -> Ingredient {
    Ingredient {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category,
        description: None,
        calories,
        protein,
        carbs,
        fat,
    }
}

/// Seeds a small demo catalog and one demo user so the binary is usable
/// without a database. The demo user id is logged at startup.
pub async fn demo_stores() -> (Arc<InMemoryCatalog>, Arc<InMemoryUsers>, Uuid) {
    let catalog = Arc::new(InMemoryCatalog::new());
    let users = Arc::new(InMemoryUsers::new());
    let author_id = Uuid::new_v4();

    let chicken = ingredient("Chicken Breast", IngredientCategory::Meat, 165.0, 31.0, 0.0, 3.6);
    let broccoli = ingredient("Broccoli", IngredientCategory::Vegetable, 34.0, 2.8, 7.0, 0.4);
    let garlic = ingredient("Garlic", IngredientCategory::Vegetable, 149.0, 6.4, 33.0, 0.5);
    let rice = ingredient("White Rice", IngredientCategory::Grain, 130.0, 2.7, 28.0, 0.3);
    let shrimp = ingredient("Shrimp", IngredientCategory::Seafood, 99.0, 24.0, 0.2, 0.3);
    let cheddar = ingredient("Cheddar Cheese", IngredientCategory::Dairy, 403.0, 25.0, 1.3, 33.0);

    let recipes = vec![
        Recipe {
            id: Uuid::new_v4(),
            title: "Garlic Chicken with Broccoli".to_string(),
            description: "Skillet chicken breast with garlic and steamed broccoli".to_string(),
            difficulty: Difficulty::Easy,
            instructions: vec![
                "Season and sear the chicken".to_string(),
                "Steam the broccoli".to_string(),
                "Toss with garlic".to_string(),
            ],
            prep_time: 10,
            cook_time: 20,
            servings: 2,
            cuisine: Cuisine::American,
            meal_type: MealType::Dinner,
            tags: vec!["quick".to_string(), "high-protein".to_string()],
            average_rating: 4.6,
            review_count: 112,
            calories: 420.0,
            protein: 45.0,
            carbs: 12.0,
            fat: 18.0,
            fiber: 4.0,
            sugar: 2.0,
            sodium: 0.7,
            author_id,
            ingredients: vec![chicken.clone(), broccoli.clone(), garlic.clone()],
        },
        Recipe {
            id: Uuid::new_v4(),
            title: "Shrimp Fried Rice".to_string(),
            description: "Weeknight fried rice with shrimp and garlic".to_string(),
            difficulty: Difficulty::Medium,
            instructions: vec![
                "Cook the rice".to_string(),
                "Stir-fry the shrimp".to_string(),
                "Combine and season".to_string(),
            ],
            prep_time: 15,
            cook_time: 15,
            servings: 3,
            cuisine: Cuisine::Chinese,
            meal_type: MealType::Dinner,
            tags: vec!["seafood".to_string()],
            average_rating: 4.3,
            review_count: 64,
            calories: 510.0,
            protein: 28.0,
            carbs: 58.0,
            fat: 16.0,
            fiber: 2.0,
            sugar: 3.0,
            sodium: 1.1,
            author_id,
            ingredients: vec![shrimp.clone(), rice.clone(), garlic.clone()],
        },
        Recipe {
            id: Uuid::new_v4(),
            title: "Broccoli Cheddar Bake".to_string(),
            description: "Oven-baked broccoli smothered in cheddar".to_string(),
            difficulty: Difficulty::Easy,
            instructions: vec![
                "Blanch the broccoli".to_string(),
                "Top with cheddar and bake".to_string(),
            ],
            prep_time: 10,
            cook_time: 25,
            servings: 4,
            cuisine: Cuisine::American,
            meal_type: MealType::Dinner,
            tags: vec!["vegetarian".to_string()],
            average_rating: 4.0,
            review_count: 38,
            calories: 330.0,
            protein: 15.0,
            carbs: 14.0,
            fat: 24.0,
            fiber: 4.0,
            sugar: 3.0,
            sodium: 0.9,
            author_id,
            ingredients: vec![broccoli.clone(), cheddar.clone()],
        },
    ];

    for ing in [chicken, broccoli, garlic, rice, shrimp, cheddar] {
        catalog.add_ingredient(ing).await;
    }
    for recipe in recipes {
        catalog.add_recipe(recipe).await;
    }

    let mut demo_user = UserProfile::new(Uuid::new_v4());
    demo_user.pantry.push(PantryItem::new("Chicken Breast", 2.0, "pieces"));
    demo_user.pantry.push(PantryItem::new("Broccoli", 1.0, "head"));
    demo_user.pantry.push(PantryItem::new("Garlic", 4.0, "cloves"));
    let demo_user_id = demo_user.id;
    users.add_user(demo_user).await;

    (catalog, users, demo_user_id)
}
