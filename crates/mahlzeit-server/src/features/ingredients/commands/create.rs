//! Add an ingredient to the catalog
//!
//! Idempotent by name: when the trimmed name already exists the existing
//! entry is returned and nothing is written.

use mahlzeit_common::types::CatalogIngredient;
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;
use crate::features::shared::validation::{validate_name, NameValidationError, MAX_NAME_LENGTH};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateIngredientCommand {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateIngredientError {
    #[error("Name validation failed: {0}")]
    NameValidation(#[from] NameValidationError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<CatalogIngredient, CreateIngredientError>> for CreateIngredientCommand {}

impl crate::cqrs::middleware::Command for CreateIngredientCommand {}

impl CreateIngredientCommand {
    pub fn validate(&self) -> Result<(), CreateIngredientError> {
        validate_name(&self.name, MAX_NAME_LENGTH)?;
        Ok(())
    }
}

impl From<CreateIngredientError> for AppError {
    fn from(err: CreateIngredientError) -> Self {
        match err {
            CreateIngredientError::Database(e) => AppError::Database(e),
            other => AppError::Validation(other.to_string()),
        }
    }
}

#[tracing::instrument(skip(store, command), fields(name = %command.name))]
pub async fn handle(
    store: &dyn RecipeStore,
    command: CreateIngredientCommand,
) -> Result<CatalogIngredient, CreateIngredientError> {
    command.validate()?;

    let ingredient = store.add_ingredient(command.name.trim()).await?;

    tracing::info!(ingredient_id = ingredient.id, "Ingredient available");

    Ok(ingredient)
}
