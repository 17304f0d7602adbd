use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User};

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, saved_recipes
            FROM users
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("select user by email")?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, saved_recipes
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("select user by id")?;
        Ok(user)
    }

    pub async fn find_by_ids(db: &PgPool, ids: &[Uuid]) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, saved_recipes
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(db)
        .await
        .context("select users by ids")?;
        Ok(users)
    }

    /// Create a new user with an already hashed password.
    pub async fn create(db: &PgPool, new: NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, saved_recipes
            "#,
        )
        .bind(new.username)
        .bind(new.email)
        .bind(new.password_hash)
        .fetch_one(db)
        .await
        .context("insert user")?;
        Ok(user)
    }

    /// Persist the saved-recipes list of an existing user.
    pub async fn update_saved_recipes(&self, db: &PgPool) -> anyhow::Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
               SET saved_recipes = $2
             WHERE id = $1
            "#,
        )
        .bind(self.id)
        .bind(&self.saved_recipes)
        .execute(db)
        .await
        .context("update saved recipes")?;

        anyhow::ensure!(result.rows_affected() == 1, "user {} does not exist", self.id);
        Ok(())
    }

    /// Conditional append done by the database, so two saves racing on the
    /// same user both land.
    pub async fn add_saved_recipe(
        db: &PgPool,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
               SET saved_recipes = array_append(saved_recipes, $2)
             WHERE id = $1
               AND NOT ($2 = ANY(saved_recipes))
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(db)
        .await
        .context("append saved recipe")?;

        Ok(result.rows_affected() == 1)
    }
}
