//! Delete step command
//!
//! Idempotent: deleting a step that does not exist, or that belongs to
//! another recipe, succeeds with `deleted: false`. The step's ingredient
//! associations go with it; catalog ingredients and units stay.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;
use crate::features::shared::validation::{validate_id, IdValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteStepCommand {
    pub recipe_id: i64,
    pub step_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteStepResponse {
    pub step_id: i64,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteStepError {
    /// Recipe or step ID is not positive
    #[error("{0}")]
    InvalidId(#[from] IdValidationError),

    /// Delete failed; a missing step is not an error
    #[error("Database error while deleting step {step_id}: {source}")]
    Database { step_id: i64, source: DbError },
}

impl Request<Result<DeleteStepResponse, DeleteStepError>> for DeleteStepCommand {}

impl crate::cqrs::middleware::Command for DeleteStepCommand {}

impl DeleteStepCommand {
    pub fn validate(&self) -> Result<(), DeleteStepError> {
        validate_id(self.recipe_id, "recipe")?;
        validate_id(self.step_id, "step")?;
        Ok(())
    }
}

impl From<DeleteStepError> for AppError {
    fn from(err: DeleteStepError) -> Self {
        match err {
            DeleteStepError::InvalidId(e) => AppError::BadRequest(e.to_string()),
            DeleteStepError::Database { source, .. } => AppError::Database(source),
        }
    }
}

#[tracing::instrument(skip(store), fields(recipe_id = command.recipe_id, step_id = command.step_id))]
pub async fn handle(
    store: &dyn RecipeStore,
    command: DeleteStepCommand,
) -> Result<DeleteStepResponse, DeleteStepError> {
    command.validate()?;

    let step_id = command.step_id;
    let db_err = |source: DbError| DeleteStepError::Database { step_id, source };
    let unchanged = DeleteStepResponse {
        step_id,
        deleted: false,
    };

    match store.get_step_by_id(step_id).await {
        Ok(step) if step.recipe_id == command.recipe_id => {},
        Ok(_) | Err(DbError::NotFound(_)) => {
            tracing::debug!(step_id, "Step already absent");
            return Ok(unchanged);
        },
        Err(e) => return Err(db_err(e)),
    }

    let rows = store.delete_step_by_id(step_id).await.map_err(db_err)?;

    tracing::info!(step_id, rows, "Step deleted");

    Ok(DeleteStepResponse {
        step_id,
        deleted: rows > 0,
    })
}
