//! External data collaborators
//!
//! The recommender never touches persistence directly; it reads recipes,
//! ingredients and user profiles through these traits. The binary wires in
//! the in-memory implementations; tests use either those or mockall mocks.

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Ingredient, Recipe, UserProfile},
};

pub mod memory;

pub use memory::{InMemoryCatalog, InMemoryUsers};

/// Read access to the recipe/ingredient catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns one page of recipes; used to stream the catalog in batches.
    /// Paging order is stable for the lifetime of the store.
    async fn list_recipes(&self, offset: usize, limit: usize) -> AppResult<Vec<Recipe>>;

    /// Resolves ingredient ids to ingredients; unknown ids are simply absent
    /// from the result, never an error.
    async fn find_ingredients_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Ingredient>>;

    /// Returns up to `limit` recipes not in `exclude`, ordered by average
    /// rating then review count, both descending.
    async fn find_recipes_excluding(&self, exclude: &[Uuid], limit: usize)
        -> AppResult<Vec<Recipe>>;
}

/// Read access to user profiles
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Loads a user's allergens, pantry and liked recipes in one call
    async fn find_user_with_pantry_and_likes(
        &self,
        user_id: Uuid,
    ) -> AppResult<Option<UserProfile>>;
}
