use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    dto::MessageResponse,
    error::AppError,
    recipes::{
        dto::{CreateRecipeRequest, CreatedRecipeResponse, SaveRecipeRequest},
        repo_types::{NewRecipe, Recipe, RecipeWithAuthor},
    },
    state::AppState,
    store::populate,
};

const INVALID_USER_ID: &str = "Invalid User ID";
const INVALID_IDS: &str = "Invalid User ID or Recipe ID";
const USER_NOT_FOUND: &str = "User not found";

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/save", post(save_recipe))
        .route("/recipes/saved/:user_id", get(saved_recipes))
}

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// Missing, null, and non-string ids are all malformed.
fn id_field(raw: Option<&Value>) -> Option<Uuid> {
    raw.and_then(Value::as_str).and_then(parse_id)
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedRecipeResponse>), AppError> {
    let Json(payload) = payload?;

    let user_id = id_field(payload.user_id.as_ref())
        .ok_or_else(|| AppError::validation(INVALID_USER_ID))?;

    let user = state
        .store
        .find_user_by_id(user_id)
        .await
        .context("find user by id")?
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

    let recipe = state
        .store
        .create_recipe(NewRecipe {
            title: payload.title,
            ingredients: payload.ingredients,
            instructions: payload.instructions,
            image_url: payload.image_url,
            created_by: user.id,
        })
        .await
        .context("create recipe")?;

    info!(recipe_id = %recipe.id, user_id = %user.id, "recipe created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedRecipeResponse {
            message: "Recipe created successfully",
            recipe,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecipeWithAuthor>>, AppError> {
    let recipes = populate::find_all_recipes(state.store.as_ref()).await?;
    Ok(Json(recipes))
}

/// The recipe id is not checked against stored recipes.
#[instrument(skip(state, payload))]
pub async fn save_recipe(
    State(state): State<AppState>,
    payload: Result<Json<SaveRecipeRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(payload) = payload?;

    let (Some(user_id), Some(recipe_id)) = (
        id_field(payload.user_id.as_ref()),
        id_field(payload.recipe_id.as_ref()),
    ) else {
        return Err(AppError::validation(INVALID_IDS));
    };

    state
        .store
        .find_user_by_id(user_id)
        .await
        .context("find user by id")?
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

    let appended = state
        .store
        .add_saved_recipe(user_id, recipe_id)
        .await
        .context("add saved recipe")?;
    if appended {
        info!(%user_id, %recipe_id, "recipe saved");
    } else {
        debug!(%user_id, %recipe_id, "recipe already saved");
    }

    Ok(Json(MessageResponse::new("Recipe saved successfully")))
}

#[instrument(skip(state))]
pub async fn saved_recipes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let user_id =
        parse_id(&user_id).ok_or_else(|| AppError::validation(INVALID_USER_ID))?;

    let (_, saved) = populate::find_user_by_id_with_saved_recipes(state.store.as_ref(), user_id)
        .await?
        .ok_or_else(|| AppError::not_found(USER_NOT_FOUND))?;

    Ok(Json(saved))
}
