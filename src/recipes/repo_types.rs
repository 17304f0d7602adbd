use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::User;

/// Recipe record in the store. `created_by` is a bare user id.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: Option<serde_json::Value>,
    pub ingredients: Option<serde_json::Value>,
    pub instructions: Option<serde_json::Value>,
    pub image_url: Option<serde_json::Value>,
    pub created_by: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: Option<serde_json::Value>,
    pub ingredients: Option<serde_json::Value>,
    pub instructions: Option<serde_json::Value>,
    pub image_url: Option<serde_json::Value>,
    pub created_by: Uuid,
}

/// Public projection of a user embedded in a recipe listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<&User> for Author {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
        }
    }
}

/// A recipe with `created_by` resolved. `None` when the author no longer
/// resolves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeWithAuthor {
    pub id: Uuid,
    pub title: Option<serde_json::Value>,
    pub ingredients: Option<serde_json::Value>,
    pub instructions: Option<serde_json::Value>,
    pub image_url: Option<serde_json::Value>,
    pub created_by: Option<Author>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl RecipeWithAuthor {
    pub fn new(r: Recipe, author: Option<Author>) -> Self {
        Self {
            id: r.id,
            title: r.title,
            ingredients: r.ingredients,
            instructions: r.instructions,
            image_url: r.image_url,
            created_by: author,
            created_at: r.created_at,
        }
    }
}
