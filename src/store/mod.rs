//! Data access: the [`Store`] port, its backends, and read-time reference
//! resolution.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    recipes::repo_types::{NewRecipe, Recipe},
    users::repo_types::{NewUser, User},
};

mod memory;
pub mod populate;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence port shared by all handlers. Ids are already parsed; lookups
/// never see malformed input.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    /// Missing ids are skipped; order is unspecified.
    async fn find_users_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<User>>;
    async fn create_user(&self, new: NewUser) -> anyhow::Result<User>;
    /// Persists mutations of an existing user. Fails if the user is gone.
    async fn save_user(&self, user: &User) -> anyhow::Result<()>;
    /// Appends `recipe_id` to the user's saved list unless it is already
    /// there, in a single write so concurrent saves cannot drop each other.
    /// Returns whether the list changed.
    async fn add_saved_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool>;

    async fn create_recipe(&self, new: NewRecipe) -> anyhow::Result<Recipe>;
    /// All recipes in insertion order, references unresolved.
    async fn find_recipes(&self) -> anyhow::Result<Vec<Recipe>>;
    /// Missing ids are skipped; order is unspecified.
    async fn find_recipes_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Recipe>>;
}
