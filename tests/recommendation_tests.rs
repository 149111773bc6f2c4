use std::io::Write;
use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use larder_api::{
    models::{
        Cuisine, Difficulty, Ingredient, IngredientCategory, MealType, PantryItem, Recipe,
        UserProfile,
    },
    services::{EmbeddingStore, RecommendationEngine},
    state::AppState,
    stores::{InMemoryCatalog, InMemoryUsers},
};

fn ingredient(name: &str, category: IngredientCategory) -> Ingredient {
    Ingredient::new(name, category)
}

fn recipe(title: &str, ingredients: Vec<Ingredient>, rating: f32) -> Recipe {
    Recipe {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("A dish of {}", title.to_lowercase()),
        difficulty: Difficulty::Easy,
        instructions: vec![format!("Prepare the {}", title.to_lowercase())],
        prep_time: 15,
        cook_time: 25,
        servings: 2,
        cuisine: Cuisine::Other,
        meal_type: MealType::Dinner,
        tags: Vec::new(),
        average_rating: rating,
        review_count: 10,
        calories: 400.0,
        protein: 25.0,
        carbs: 30.0,
        fat: 15.0,
        fiber: 3.0,
        sugar: 4.0,
        sodium: 0.5,
        author_id: Uuid::new_v4(),
        ingredients,
    }
}

struct TestApp {
    server: TestServer,
    // Keeps the embedding artifact alive for the duration of the test
    _embeddings_file: tempfile::NamedTempFile,
}

async fn build_app(
    recipes: Vec<Recipe>,
    users: Vec<UserProfile>,
    embeddings_json: &str,
) -> TestApp {
    let catalog = Arc::new(InMemoryCatalog::new());
    for r in recipes {
        catalog.add_recipe(r).await;
    }

    let user_store = Arc::new(InMemoryUsers::new());
    for u in users {
        user_store.add_user(u).await;
    }

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(embeddings_json.as_bytes()).unwrap();

    let engine = Arc::new(RecommendationEngine::new(
        catalog,
        user_store,
        EmbeddingStore::new(file.path()),
        100,
    ));
    engine.warm_up().await.unwrap();

    let app = larder_api::create_router(AppState::new(engine));
    TestApp {
        server: TestServer::new(app).unwrap(),
        _embeddings_file: file,
    }
}

#[tokio::test]
async fn test_health_check() {
    let app = build_app(vec![], vec![], "{}").await;
    let response = app.server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_pantry_recommendations_rank_matches_first() {
    let chicken = ingredient("Chicken Breast", IngredientCategory::Meat);
    let broccoli = ingredient("Broccoli", IngredientCategory::Vegetable);
    let dragonfruit = ingredient("Dragonfruit", IngredientCategory::Fruit);

    let matched = recipe("Chicken and Broccoli", vec![chicken, broccoli], 4.0);
    let unmatched = recipe("Dragonfruit Salad", vec![dragonfruit], 4.9);

    let mut user = UserProfile::new(Uuid::new_v4());
    user.pantry.push(PantryItem::new("Chicken Breast", 2.0, "pieces"));
    user.pantry.push(PantryItem::new("Broccoli", 1.0, "head"));
    let user_id = user.id;

    let app = build_app(
        vec![matched.clone(), unmatched.clone()],
        vec![user],
        r#"{
            "chicken_breast": [1.0, 0.0, 0.0],
            "broccoli": [0.0, 1.0, 0.0]
        }"#,
    )
    .await;

    let response = app
        .server
        .get(&format!("/api/v1/users/{}/recommendations/pantry", user_id))
        .await;
    response.assert_status_ok();

    let items: Vec<Value> = response.json();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["recipe"]["title"], "Chicken and Broccoli");
    assert!(items[0]["score"].as_f64().unwrap() > 0.0);
    assert_eq!(items[1]["recipe"]["title"], "Dragonfruit Salad");
    assert_eq!(items[1]["score"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_pantry_recommendations_exclude_allergens() {
    let shrimp_recipe = recipe(
        "Shrimp Skewers",
        vec![ingredient("Shrimp", IngredientCategory::Seafood)],
        4.0,
    );
    let stock_recipe = recipe(
        "Seafood Soup",
        vec![ingredient("Shellfish Stock", IngredientCategory::Seafood)],
        4.5,
    );

    let mut user = UserProfile::new(Uuid::new_v4());
    // Residual list-literal formatting from upstream storage
    user.allergens.push("['shellfish']".to_string());
    user.pantry.push(PantryItem::new("Shrimp", 1.0, "lb"));
    let user_id = user.id;

    let app = build_app(
        vec![shrimp_recipe, stock_recipe],
        vec![user],
        r#"{"shrimp": [1.0, 0.0]}"#,
    )
    .await;

    let response = app
        .server
        .get(&format!("/api/v1/users/{}/recommendations/pantry", user_id))
        .await;
    response.assert_status_ok();

    // "Shrimp" contains no literal "shellfish" substring; "Shellfish Stock" does
    let items: Vec<Value> = response.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["recipe"]["title"], "Shrimp Skewers");
}

#[tokio::test]
async fn test_pantry_filters_via_query_params() {
    let mut easy = recipe(
        "Easy Bowl",
        vec![ingredient("Garlic", IngredientCategory::Vegetable)],
        4.0,
    );
    easy.difficulty = Difficulty::Easy;
    easy.tags = vec!["quick".to_string()];
    let mut hard = recipe(
        "Hard Bowl",
        vec![ingredient("Garlic", IngredientCategory::Vegetable)],
        4.8,
    );
    hard.difficulty = Difficulty::Hard;

    let mut user = UserProfile::new(Uuid::new_v4());
    user.pantry.push(PantryItem::new("Garlic", 3.0, "cloves"));
    let user_id = user.id;

    let app = build_app(vec![easy, hard], vec![user], r#"{"garlic": [1.0]}"#).await;

    let response = app
        .server
        .get(&format!(
            "/api/v1/users/{}/recommendations/pantry?difficulty=easy&tags=quick,weeknight",
            user_id
        ))
        .await;
    response.assert_status_ok();

    let items: Vec<Value> = response.json();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["recipe"]["title"], "Easy Bowl");
}

#[tokio::test]
async fn test_recommendations_respect_limit_and_report_metadata() {
    let recipes: Vec<Recipe> = (0..20)
        .map(|i| {
            recipe(
                &format!("Popular Dish {}", i),
                vec![ingredient(&format!("Ingredient {}", i), IngredientCategory::Other)],
                4.0,
            )
        })
        .collect();

    let user = UserProfile::new(Uuid::new_v4());
    let user_id = user.id;

    let app = build_app(recipes, vec![user], "{}").await;

    let response = app
        .server
        .post(&format!("/api/v1/users/{}/recommendations", user_id))
        .json(&json!({
            "limit": 5,
            "include_content_based": false,
            "include_hybrid": false
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 5);
    assert_eq!(body["metadata"]["total_recommendations"], 5);
    assert_eq!(body["metadata"]["collaborative_count"], 5);
    assert_eq!(body["metadata"]["hybrid_count"], 0);
    assert!(recommendations
        .iter()
        .all(|r| r["type"] == "collaborative"));
}

#[tokio::test]
async fn test_extreme_limit_still_returns_well_formed_response() {
    let only = recipe(
        "Only Dish",
        vec![ingredient("Garlic", IngredientCategory::Vegetable)],
        4.0,
    );

    let user = UserProfile::new(Uuid::new_v4());
    let user_id = user.id;

    let app = build_app(vec![only], vec![user], "{}").await;

    let response = app
        .server
        .post(&format!("/api/v1/users/{}/recommendations", user_id))
        .json(&json!({
            "limit": u64::MAX,
            "include_content_based": false,
            "include_hybrid": false
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(body["metadata"]["total_recommendations"], 1);
}

#[tokio::test]
async fn test_liked_recipes_never_recommended() {
    let liked = recipe(
        "Already Liked",
        vec![ingredient("Garlic", IngredientCategory::Vegetable)],
        5.0,
    );
    let fresh = recipe(
        "Something New",
        vec![ingredient("Onion", IngredientCategory::Vegetable)],
        4.0,
    );

    let mut user = UserProfile::new(Uuid::new_v4());
    user.liked_recipe_ids.push(liked.id);
    let user_id = user.id;

    let app = build_app(vec![liked, fresh], vec![user], "{}").await;

    let response = app
        .server
        .post(&format!("/api/v1/users/{}/recommendations", user_id))
        .json(&json!({ "include_content_based": false, "include_hybrid": false }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["recipe"]["title"], "Something New");
}

#[tokio::test]
async fn test_content_recommendations_over_http() {
    let garlic = ingredient("Garlic", IngredientCategory::Vegetable);
    let garlic_id = garlic.id;
    let garlic_recipe = recipe("Garlic Chicken", vec![garlic], 4.2);
    // Fully disjoint vocabulary so its similarity to the query is exactly zero
    let mut cake = recipe(
        "Chocolate Cake",
        vec![ingredient("Chocolate", IngredientCategory::Baking)],
        4.8,
    );
    cake.description = "Rich molten dessert".to_string();
    cake.instructions = vec!["Bake until gooey".to_string()];

    let user = UserProfile::new(Uuid::new_v4());
    let user_id = user.id;

    let app = build_app(vec![garlic_recipe, cake], vec![user], "{}").await;

    let response = app
        .server
        .post(&format!("/api/v1/users/{}/recommendations", user_id))
        .json(&json!({
            "ingredient_ids": [garlic_id],
            "include_collaborative": false,
            "include_hybrid": false
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let recommendations = body["recommendations"].as_array().unwrap();
    // Zero-similarity recipes are dropped entirely
    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0]["recipe"]["title"], "Garlic Chicken");
    assert_eq!(recommendations[0]["type"], "content");
}

#[tokio::test]
async fn test_missing_strategies_is_bad_request() {
    let user = UserProfile::new(Uuid::new_v4());
    let user_id = user.id;
    let app = build_app(vec![], vec![user], "{}").await;

    let response = app
        .server
        .post(&format!("/api/v1/users/{}/recommendations", user_id))
        .json(&json!({ "include_collaborative": false }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = build_app(vec![], vec![], "{}").await;

    let response = app
        .server
        .post(&format!("/api/v1/users/{}/recommendations", Uuid::new_v4()))
        .json(&json!({}))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}
