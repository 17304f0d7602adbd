use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::recipes::repo_types::{NewRecipe, Recipe};

impl Recipe {
    pub async fn create(db: &PgPool, new: NewRecipe) -> anyhow::Result<Recipe> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (title, ingredients, instructions, image_url, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, ingredients, instructions, image_url, created_by, created_at
            "#,
        )
        .bind(new.title)
        .bind(new.ingredients)
        .bind(new.instructions)
        .bind(new.image_url)
        .bind(new.created_by)
        .fetch_one(db)
        .await
        .context("insert recipe")?;
        Ok(recipe)
    }

    /// All recipes, oldest first.
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, ingredients, instructions, image_url, created_by, created_at
              FROM recipes
             ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(db)
        .await
        .context("list recipes")?;
        Ok(rows)
    }

    pub async fn find_by_ids(db: &PgPool, ids: &[Uuid]) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, ingredients, instructions, image_url, created_by, created_at
              FROM recipes
             WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(db)
        .await
        .context("select recipes by ids")?;
        Ok(rows)
    }
}
