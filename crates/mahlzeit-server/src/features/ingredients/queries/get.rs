use mahlzeit_common::types::CatalogIngredient;
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;
use crate::features::shared::validation::{validate_id, IdValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetIngredientQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetIngredientError {
    #[error("{0}")]
    InvalidId(#[from] IdValidationError),

    #[error("Ingredient {0} not found")]
    NotFound(i64),

    #[error("Database error while loading ingredient {id}: {source}")]
    Database { id: i64, source: DbError },
}

impl Request<Result<CatalogIngredient, GetIngredientError>> for GetIngredientQuery {}

impl crate::cqrs::middleware::Query for GetIngredientQuery {}

impl GetIngredientQuery {
    pub fn validate(&self) -> Result<(), GetIngredientError> {
        validate_id(self.id, "ingredient")?;
        Ok(())
    }
}

impl From<GetIngredientError> for AppError {
    fn from(err: GetIngredientError) -> Self {
        match err {
            GetIngredientError::InvalidId(e) => AppError::BadRequest(e.to_string()),
            GetIngredientError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetIngredientError::Database { source, .. } => AppError::Database(source),
        }
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn RecipeStore,
    query: GetIngredientQuery,
) -> Result<CatalogIngredient, GetIngredientError> {
    query.validate()?;

    let id = query.id;
    store
        .get_ingredient_name_by_id(id)
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => GetIngredientError::NotFound(id),
            source => GetIngredientError::Database { id, source },
        })
}
