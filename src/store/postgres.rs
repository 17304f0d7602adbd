use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::Store;
use crate::{
    recipes::repo_types::{NewRecipe, Recipe},
    users::repo_types::{NewUser, User},
};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        User::find_by_email(&self.db, email).await
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        User::find_by_id(&self.db, id).await
    }

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<User>> {
        User::find_by_ids(&self.db, ids).await
    }

    async fn create_user(&self, new: NewUser) -> anyhow::Result<User> {
        User::create(&self.db, new).await
    }

    async fn save_user(&self, user: &User) -> anyhow::Result<()> {
        user.update_saved_recipes(&self.db).await
    }

    async fn add_saved_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool> {
        User::add_saved_recipe(&self.db, user_id, recipe_id).await
    }

    async fn create_recipe(&self, new: NewRecipe) -> anyhow::Result<Recipe> {
        Recipe::create(&self.db, new).await
    }

    async fn find_recipes(&self) -> anyhow::Result<Vec<Recipe>> {
        Recipe::list(&self.db).await
    }

    async fn find_recipes_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Recipe>> {
        Recipe::find_by_ids(&self.db, ids).await
    }
}
