//! Update step command
//!
//! Replaces the instruction and time of a step. This is a full update: a
//! missing `time` resets it to zero.

use mahlzeit_common::types::duration_secs;
use mediator::Request;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;
use crate::features::shared::validation::{
    validate_id, validate_text, IdValidationError, TextTooLongError, MAX_TEXT_LENGTH,
};
use crate::features::steps::types::StepResponse;

/// `recipe_id` and `step_id` come from the request path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStepCommand {
    #[serde(default, skip_deserializing)]
    pub recipe_id: i64,
    #[serde(default, skip_deserializing)]
    pub step_id: i64,
    pub instruction: String,
    /// Seconds
    #[serde(default, with = "duration_secs")]
    pub time: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateStepError {
    /// Recipe or step ID is not positive
    #[error("{0}")]
    InvalidId(#[from] IdValidationError),

    /// Instruction exceeds its limit
    #[error("{0}")]
    TextTooLong(#[from] TextTooLongError),

    /// Step does not exist or belongs to another recipe
    #[error("Step {step_id} not found in recipe {recipe_id}")]
    NotFound { recipe_id: i64, step_id: i64 },

    /// Update failed
    #[error("Database error while updating step {step_id}: {source}")]
    Database { step_id: i64, source: DbError },
}

impl Request<Result<StepResponse, UpdateStepError>> for UpdateStepCommand {}

impl crate::cqrs::middleware::Command for UpdateStepCommand {}

impl UpdateStepCommand {
    #[tracing::instrument(skip(self), fields(recipe_id = self.recipe_id, step_id = self.step_id))]
    pub fn validate(&self) -> Result<(), UpdateStepError> {
        validate_id(self.recipe_id, "recipe")?;
        validate_id(self.step_id, "step")?;
        validate_text(&self.instruction, "instruction", MAX_TEXT_LENGTH)?;
        Ok(())
    }
}

impl From<UpdateStepError> for AppError {
    fn from(err: UpdateStepError) -> Self {
        match err {
            UpdateStepError::NotFound { .. } => AppError::NotFound(err.to_string()),
            UpdateStepError::Database { source, .. } => AppError::Database(source),
            other => AppError::Validation(other.to_string()),
        }
    }
}

#[tracing::instrument(skip(store, command), fields(recipe_id = command.recipe_id, step_id = command.step_id))]
pub async fn handle(
    store: &dyn RecipeStore,
    command: UpdateStepCommand,
) -> Result<StepResponse, UpdateStepError> {
    command.validate()?;

    let UpdateStepCommand {
        recipe_id,
        step_id,
        instruction,
        time,
    } = command;
    let not_found = UpdateStepError::NotFound { recipe_id, step_id };
    let db_err = |source: DbError| UpdateStepError::Database { step_id, source };

    let existing = match store.get_step_by_id(step_id).await {
        Ok(step) => step,
        Err(DbError::NotFound(_)) => return Err(not_found),
        Err(e) => return Err(db_err(e)),
    };
    if existing.recipe_id != recipe_id {
        return Err(not_found);
    }

    let step = store
        .update_step_by_id(step_id, &instruction, time)
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => UpdateStepError::NotFound { recipe_id, step_id },
            other => db_err(other),
        })?;

    tracing::info!(recipe_id, step_id, "Step updated");

    Ok(step.into())
}
