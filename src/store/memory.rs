use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::{
    recipes::repo_types::{NewRecipe, Recipe},
    users::repo_types::{NewUser, User},
};

/// Process-local store. Used by tests and when no database is configured.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    recipes: Vec<Recipe>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let c = self.inner.read().await;
        Ok(c.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let c = self.inner.read().await;
        Ok(c.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_users_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<User>> {
        let c = self.inner.read().await;
        Ok(c.users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create_user(&self, new: NewUser) -> anyhow::Result<User> {
        let user = User {
            id: Uuid::new_v4(),
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            saved_recipes: Vec::new(),
        };
        self.inner.write().await.users.push(user.clone());
        Ok(user)
    }

    async fn save_user(&self, user: &User) -> anyhow::Result<()> {
        let mut c = self.inner.write().await;
        let Some(stored) = c.users.iter_mut().find(|u| u.id == user.id) else {
            anyhow::bail!("user {} does not exist", user.id);
        };
        *stored = user.clone();
        Ok(())
    }

    async fn add_saved_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool> {
        let mut c = self.inner.write().await;
        let Some(stored) = c.users.iter_mut().find(|u| u.id == user_id) else {
            anyhow::bail!("user {user_id} does not exist");
        };
        Ok(stored.save_recipe(recipe_id))
    }

    async fn create_recipe(&self, new: NewRecipe) -> anyhow::Result<Recipe> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            title: new.title,
            ingredients: new.ingredients,
            instructions: new.instructions,
            image_url: new.image_url,
            created_by: new.created_by,
            created_at: OffsetDateTime::now_utc(),
        };
        self.inner.write().await.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn find_recipes(&self) -> anyhow::Result<Vec<Recipe>> {
        Ok(self.inner.read().await.recipes.clone())
    }

    async fn find_recipes_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Recipe>> {
        let c = self.inner.read().await;
        Ok(c.recipes
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "cook".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_ids_and_finds_by_email() {
        let store = MemoryStore::new();
        let a = store.create_user(new_user("a@example.com")).await.unwrap();
        let b = store.create_user(new_user("b@example.com")).await.unwrap();
        assert_ne!(a.id, b.id);

        let found = store.find_user_by_email("b@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(b.id));
        assert!(store.find_user_by_email("c@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_user_persists_saved_recipes() {
        let store = MemoryStore::new();
        let mut user = store.create_user(new_user("a@example.com")).await.unwrap();
        let recipe_id = Uuid::new_v4();
        user.save_recipe(recipe_id);
        store.save_user(&user).await.unwrap();

        let reloaded = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.saved_recipes, vec![recipe_id]);
    }

    #[tokio::test]
    async fn save_user_fails_for_unknown_user() {
        let store = MemoryStore::new();
        let ghost = User {
            id: Uuid::new_v4(),
            username: "ghost".into(),
            email: "ghost@example.com".into(),
            password_hash: "hash".into(),
            saved_recipes: vec![],
        };
        assert!(store.save_user(&ghost).await.is_err());
    }

    #[tokio::test]
    async fn add_saved_recipe_ignores_stale_copies() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com")).await.unwrap();
        let first = store.find_user_by_id(user.id).await.unwrap().unwrap();
        let second = store.find_user_by_id(user.id).await.unwrap().unwrap();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        assert!(store.add_saved_recipe(first.id, a).await.unwrap());
        assert!(store.add_saved_recipe(second.id, b).await.unwrap());
        assert!(!store.add_saved_recipe(first.id, a).await.unwrap());

        let reloaded = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.saved_recipes, vec![a, b]);
    }

    #[tokio::test]
    async fn concurrent_saves_all_land() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let user_id = store.create_user(new_user("a@example.com")).await.unwrap().id;

        let recipes: Vec<Uuid> = (0..16).map(|_| Uuid::new_v4()).collect();
        let tasks: Vec<_> = recipes
            .iter()
            .map(|&rid| {
                let store = store.clone();
                tokio::spawn(async move { store.add_saved_recipe(user_id, rid).await })
            })
            .collect();
        for t in tasks {
            assert!(t.await.unwrap().unwrap());
        }

        let reloaded = store.find_user_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(reloaded.saved_recipes.len(), recipes.len());
        assert!(recipes.iter().all(|r| reloaded.saved_recipes.contains(r)));
    }

    #[tokio::test]
    async fn add_saved_recipe_fails_for_unknown_user() {
        let store = MemoryStore::new();
        assert!(store
            .add_saved_recipe(Uuid::new_v4(), Uuid::new_v4())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn recipes_keep_insertion_order() {
        let store = MemoryStore::new();
        let author = Uuid::new_v4();
        let mut ids = Vec::new();
        for title in ["a", "b", "c"] {
            let r = store
                .create_recipe(NewRecipe {
                    title: Some(title.into()),
                    ingredients: None,
                    instructions: None,
                    image_url: None,
                    created_by: author,
                })
                .await
                .unwrap();
            ids.push(r.id);
        }
        let listed: Vec<Uuid> = store.find_recipes().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(listed, ids);

        let some = store.find_recipes_by_ids(&[ids[2], Uuid::new_v4()]).await.unwrap();
        assert_eq!(some.len(), 1);
        assert_eq!(some[0].id, ids[2]);
    }
}
