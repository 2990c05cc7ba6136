use mahlzeit_common::types::Unit;
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUnitsQuery;

#[derive(Debug, thiserror::Error)]
pub enum ListUnitsError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Vec<Unit>, ListUnitsError>> for ListUnitsQuery {}

impl crate::cqrs::middleware::Query for ListUnitsQuery {}

impl From<ListUnitsError> for AppError {
    fn from(err: ListUnitsError) -> Self {
        match err {
            ListUnitsError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(store, _query))]
pub async fn handle(store: &dyn RecipeStore, _query: ListUnitsQuery) -> Result<Vec<Unit>, ListUnitsError> {
    Ok(store.get_all_units().await?)
}
