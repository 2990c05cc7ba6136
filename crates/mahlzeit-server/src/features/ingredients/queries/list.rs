use mahlzeit_common::types::CatalogIngredient;
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListIngredientsQuery;

#[derive(Debug, thiserror::Error)]
pub enum ListIngredientsError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Vec<CatalogIngredient>, ListIngredientsError>> for ListIngredientsQuery {}

impl crate::cqrs::middleware::Query for ListIngredientsQuery {}

impl From<ListIngredientsError> for AppError {
    fn from(err: ListIngredientsError) -> Self {
        match err {
            ListIngredientsError::Database(e) => AppError::Database(e),
        }
    }
}

/// All catalog ingredients ordered by name
#[tracing::instrument(skip(store, _query))]
pub async fn handle(
    store: &dyn RecipeStore,
    _query: ListIngredientsQuery,
) -> Result<Vec<CatalogIngredient>, ListIngredientsError> {
    Ok(store.get_all_ingredients().await?)
}
