use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// User record in the store.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt, never sent to clients
    pub saved_recipes: Vec<Uuid>,
}

/// Fields needed to create a user; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Appends `recipe_id` unless it is already saved. Returns whether the
    /// list changed.
    pub fn save_recipe(&mut self, recipe_id: Uuid) -> bool {
        if self.saved_recipes.contains(&recipe_id) {
            return false;
        }
        self.saved_recipes.push(recipe_id);
        true
    }
}
