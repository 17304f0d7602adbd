//! Read-time joins ("populate"): stored documents keep bare ids, and these
//! helpers swap them for the referenced entities' current data.

use std::{collections::HashMap, future::Future};

use anyhow::Context;
use uuid::Uuid;

use super::Store;
use crate::{
    recipes::repo_types::{Author, Recipe, RecipeWithAuthor},
    users::repo_types::User,
};

pub trait Identified {
    fn id(&self) -> Uuid;
}

impl Identified for User {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Recipe {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Looks up each distinct id once through `resolver` and indexes the hits.
/// Ids the resolver does not return are simply absent from the map.
pub async fn resolve<T, F, Fut>(mut ids: Vec<Uuid>, resolver: F) -> anyhow::Result<HashMap<Uuid, T>>
where
    T: Identified,
    F: FnOnce(Vec<Uuid>) -> Fut,
    Fut: Future<Output = anyhow::Result<Vec<T>>>,
{
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let found = resolver(ids).await?;
    Ok(found.into_iter().map(|t| (t.id(), t)).collect())
}

/// Every recipe with `created_by` resolved to its author.
pub async fn find_all_recipes(store: &dyn Store) -> anyhow::Result<Vec<RecipeWithAuthor>> {
    let recipes = store.find_recipes().await.context("load recipes")?;

    let author_ids = recipes.iter().map(|r| r.created_by).collect();
    let authors = resolve(author_ids, |ids| async move {
        store.find_users_by_ids(&ids).await
    })
    .await
    .context("resolve recipe authors")?;

    Ok(recipes
        .into_iter()
        .map(|r| {
            let author = authors.get(&r.created_by).map(Author::from);
            RecipeWithAuthor::new(r, author)
        })
        .collect())
}

/// The user plus its saved recipes, in save order. Saved ids that no longer
/// resolve are dropped.
pub async fn find_user_by_id_with_saved_recipes(
    store: &dyn Store,
    id: Uuid,
) -> anyhow::Result<Option<(User, Vec<Recipe>)>> {
    let Some(user) = store.find_user_by_id(id).await.context("load user")? else {
        return Ok(None);
    };

    let recipes = resolve(user.saved_recipes.clone(), |ids| async move {
        store.find_recipes_by_ids(&ids).await
    })
    .await
    .context("resolve saved recipes")?;

    let saved = user
        .saved_recipes
        .iter()
        .filter_map(|rid| recipes.get(rid).cloned())
        .collect();
    Ok(Some((user, saved)))
}
