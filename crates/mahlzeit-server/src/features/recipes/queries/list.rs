use mahlzeit_common::types::RecipeListEntry;
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecipesQuery;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    pub items: Vec<RecipeListEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListRecipesError {
    /// Listing failed
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<ListRecipesResponse, ListRecipesError>> for ListRecipesQuery {}

impl crate::cqrs::middleware::Query for ListRecipesQuery {}

impl From<ListRecipesError> for AppError {
    fn from(err: ListRecipesError) -> Self {
        match err {
            ListRecipesError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(store, _query))]
pub async fn handle(
    store: &dyn RecipeStore,
    _query: ListRecipesQuery,
) -> Result<ListRecipesResponse, ListRecipesError> {
    let items = store.get_all_recipes_by_name().await?;
    Ok(ListRecipesResponse { items })
}
