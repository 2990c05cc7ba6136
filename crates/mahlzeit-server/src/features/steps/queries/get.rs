use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;
use crate::features::shared::validation::{validate_id, IdValidationError};
use crate::features::steps::types::StepResponse;

/// Step header by id, scoped to its recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetStepQuery {
    pub recipe_id: i64,
    pub step_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetStepError {
    /// Recipe or step ID is not positive
    #[error("{0}")]
    InvalidId(#[from] IdValidationError),

    /// Step does not exist or belongs to another recipe
    #[error("Step {step_id} not found in recipe {recipe_id}")]
    NotFound { recipe_id: i64, step_id: i64 },

    /// Read failed
    #[error("Database error while loading step {step_id}: {source}")]
    Database { step_id: i64, source: DbError },
}

impl Request<Result<StepResponse, GetStepError>> for GetStepQuery {}

impl crate::cqrs::middleware::Query for GetStepQuery {}

impl GetStepQuery {
    pub fn validate(&self) -> Result<(), GetStepError> {
        validate_id(self.recipe_id, "recipe")?;
        validate_id(self.step_id, "step")?;
        Ok(())
    }
}

impl From<GetStepError> for AppError {
    fn from(err: GetStepError) -> Self {
        match err {
            GetStepError::InvalidId(e) => AppError::BadRequest(e.to_string()),
            GetStepError::NotFound { .. } => AppError::NotFound(err.to_string()),
            GetStepError::Database { source, .. } => AppError::Database(source),
        }
    }
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: &dyn RecipeStore, query: GetStepQuery) -> Result<StepResponse, GetStepError> {
    query.validate()?;

    let GetStepQuery { recipe_id, step_id } = query;

    match store.get_step_by_id(step_id).await {
        Ok(step) if step.recipe_id == recipe_id => Ok(step.into()),
        Ok(_) | Err(DbError::NotFound(_)) => Err(GetStepError::NotFound { recipe_id, step_id }),
        Err(source) => Err(GetStepError::Database { step_id, source }),
    }
}
