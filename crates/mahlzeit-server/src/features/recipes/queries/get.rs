//! Recipe aggregate loader
//!
//! Reads the header first so a missing recipe surfaces as not found, then
//! fetches the ingredient totals and the steps concurrently. The reads are
//! separate statements; a concurrent mutation may be observed half-applied.

use mahlzeit_common::types::{Ingredient, Recipe};
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;
use crate::features::shared::validation::{validate_id, IdValidationError};

/// Load one recipe, optionally rescaled to `servings`
///
/// `servings` of `None`, zero or a negative value returns the recipe at its
/// base servings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetRecipeQuery {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetRecipeError {
    /// Recipe ID is not positive
    #[error("{0}")]
    InvalidId(#[from] IdValidationError),

    /// No recipe with this ID
    #[error("Recipe {0} not found")]
    NotFound(i64),

    /// One of the reads failed
    #[error("Database error while loading recipe {id}: {source}")]
    Database { id: i64, source: DbError },
}

impl Request<Result<Recipe, GetRecipeError>> for GetRecipeQuery {}

impl crate::cqrs::middleware::Query for GetRecipeQuery {}

impl GetRecipeQuery {
    pub fn validate(&self) -> Result<(), GetRecipeError> {
        validate_id(self.id, "recipe")?;
        Ok(())
    }
}

impl From<GetRecipeError> for AppError {
    fn from(err: GetRecipeError) -> Self {
        match err {
            GetRecipeError::InvalidId(e) => AppError::BadRequest(e.to_string()),
            GetRecipeError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetRecipeError::Database { source, .. } => AppError::Database(source),
        }
    }
}

fn without_placeholders(ingredients: Vec<Ingredient>) -> Vec<Ingredient> {
    ingredients
        .into_iter()
        .filter(|i| !i.is_placeholder())
        .collect()
}

#[tracing::instrument(skip(store), fields(recipe_id = query.id, servings = ?query.servings))]
pub async fn handle(store: &dyn RecipeStore, query: GetRecipeQuery) -> Result<Recipe, GetRecipeError> {
    query.validate()?;

    let id = query.id;
    let db_err = |source: DbError| GetRecipeError::Database { id, source };

    let header = store.get_recipe_by_id(id).await.map_err(|e| match e {
        DbError::NotFound(_) => GetRecipeError::NotFound(id),
        other => db_err(other),
    })?;

    let (totals, steps) = tokio::try_join!(
        store.get_total_ingredients_for_recipe(id),
        store.get_steps_for_recipe_by_id(id),
    )
    .map_err(db_err)?;

    let steps = steps
        .into_iter()
        .map(|mut step| {
            step.ingredients = without_placeholders(step.ingredients);
            step
        })
        .collect();

    let mut recipe = header.into_recipe(without_placeholders(totals), steps);

    if let Some(servings) = query.servings {
        recipe.with_servings(servings);
    }

    tracing::debug!(
        steps = recipe.steps.len(),
        ingredients = recipe.ingredients.len(),
        servings = recipe.servings,
        "Recipe loaded"
    );

    Ok(recipe)
}
