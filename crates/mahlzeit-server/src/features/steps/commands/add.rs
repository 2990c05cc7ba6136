//! Add an empty step to a recipe
//!
//! The new step has no instruction, zero time and no ingredients; it is
//! filled in afterwards through the update and add-ingredient commands.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore, STEPS_RECIPE_FKEY};
use crate::error::AppError;
use crate::features::shared::validation::{validate_id, IdValidationError};
use crate::features::steps::types::StepResponse;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddStepCommand {
    pub recipe_id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum AddStepError {
    /// Recipe ID is not positive
    #[error("{0}")]
    InvalidId(#[from] IdValidationError),

    /// The recipe foreign key was violated
    #[error("Recipe {0} not found")]
    RecipeNotFound(i64),

    /// Insert failed for another reason
    #[error("Database error while adding a step to recipe {recipe_id}: {source}")]
    Database { recipe_id: i64, source: DbError },
}

impl Request<Result<StepResponse, AddStepError>> for AddStepCommand {}

impl crate::cqrs::middleware::Command for AddStepCommand {}

impl AddStepCommand {
    pub fn validate(&self) -> Result<(), AddStepError> {
        validate_id(self.recipe_id, "recipe")?;
        Ok(())
    }
}

impl From<AddStepError> for AppError {
    fn from(err: AddStepError) -> Self {
        match err {
            AddStepError::InvalidId(e) => AppError::BadRequest(e.to_string()),
            AddStepError::RecipeNotFound(_) => AppError::NotFound(err.to_string()),
            AddStepError::Database { source, .. } => AppError::Database(source),
        }
    }
}

#[tracing::instrument(skip(store), fields(recipe_id = command.recipe_id))]
pub async fn handle(
    store: &dyn RecipeStore,
    command: AddStepCommand,
) -> Result<StepResponse, AddStepError> {
    command.validate()?;

    let recipe_id = command.recipe_id;
    let step = store
        .add_new_empty_step(recipe_id)
        .await
        .map_err(|e| {
            if e.foreign_key() == Some(STEPS_RECIPE_FKEY) {
                AddStepError::RecipeNotFound(recipe_id)
            } else {
                AddStepError::Database { recipe_id, source: e }
            }
        })?;

    tracing::info!(recipe_id, step_id = step.id, "Step added");

    Ok(step.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::InMemoryStore;
    use std::time::Duration;

    #[tokio::test]
    async fn test_adds_empty_step() {
        let store = InMemoryStore::new();
        let recipe_id = store.insert_recipe("Soup", 2);

        let first = handle(&*store, AddStepCommand { recipe_id }).await.unwrap();
        let second = handle(&*store, AddStepCommand { recipe_id }).await.unwrap();

        assert_eq!(first.recipe_id, recipe_id);
        assert!(first.instruction.is_empty());
        assert_eq!(first.time, Duration::ZERO);
        assert_ne!(first.id, second.id);
        assert_eq!(store.step_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_recipe_is_not_found() {
        let store = InMemoryStore::new();
        let result = handle(&*store, AddStepCommand { recipe_id: 5 }).await;

        assert!(matches!(result, Err(AddStepError::RecipeNotFound(5))));
        assert_eq!(store.step_count(), 0);
    }

    #[tokio::test]
    async fn test_rejects_non_positive_recipe_id() {
        let store = InMemoryStore::new();
        let result = handle(&*store, AddStepCommand { recipe_id: -1 }).await;
        assert!(matches!(result, Err(AddStepError::InvalidId(_))));
    }
}
