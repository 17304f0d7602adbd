use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::recipes::repo_types::Recipe;

/// Content fields are stored as given. Ids arrive as raw JSON so any
/// malformed id, string or not, is answered by the handler instead of the
/// JSON extractor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: Option<Value>,
    pub ingredients: Option<Value>,
    pub instructions: Option<Value>,
    pub image_url: Option<Value>,
    pub user_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecipeRequest {
    pub user_id: Option<Value>,
    pub recipe_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct CreatedRecipeResponse {
    pub message: &'static str,
    pub recipe: Recipe,
}
