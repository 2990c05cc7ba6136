//! Remove an ingredient from a step. Idempotent.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;
use crate::features::shared::validation::{validate_id, IdValidationError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveIngredientFromStepCommand {
    pub recipe_id: i64,
    pub step_id: i64,
    pub ingredient_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveIngredientFromStepResponse {
    pub step_id: i64,
    pub ingredient_id: i64,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RemoveIngredientFromStepError {
    /// Step or ingredient ID is not positive
    #[error("{0}")]
    InvalidId(#[from] IdValidationError),

    /// Delete failed; a missing association is not an error
    #[error("Database error while removing ingredient {ingredient_id} from step {step_id}: {source}")]
    Database {
        step_id: i64,
        ingredient_id: i64,
        source: DbError,
    },
}

impl Request<Result<RemoveIngredientFromStepResponse, RemoveIngredientFromStepError>>
    for RemoveIngredientFromStepCommand
{
}

impl crate::cqrs::middleware::Command for RemoveIngredientFromStepCommand {}

impl RemoveIngredientFromStepCommand {
    pub fn validate(&self) -> Result<(), RemoveIngredientFromStepError> {
        validate_id(self.step_id, "step")?;
        validate_id(self.ingredient_id, "ingredient")?;
        Ok(())
    }
}

impl From<RemoveIngredientFromStepError> for AppError {
    fn from(err: RemoveIngredientFromStepError) -> Self {
        match err {
            RemoveIngredientFromStepError::InvalidId(e) => AppError::BadRequest(e.to_string()),
            RemoveIngredientFromStepError::Database { source, .. } => AppError::Database(source),
        }
    }
}

#[tracing::instrument(skip(store), fields(step_id = command.step_id, ingredient_id = command.ingredient_id))]
pub async fn handle(
    store: &dyn RecipeStore,
    command: RemoveIngredientFromStepCommand,
) -> Result<RemoveIngredientFromStepResponse, RemoveIngredientFromStepError> {
    command.validate()?;

    let RemoveIngredientFromStepCommand {
        step_id,
        ingredient_id,
        ..
    } = command;

    let rows = store
        .delete_ingredient_from_step(step_id, ingredient_id)
        .await
        .map_err(|source| RemoveIngredientFromStepError::Database {
            step_id,
            ingredient_id,
            source,
        })?;

    tracing::info!(step_id, ingredient_id, rows, "Ingredient removed from step");

    Ok(RemoveIngredientFromStepResponse {
        step_id,
        ingredient_id,
        deleted: rows > 0,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{pancakes, InMemoryStore};

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = InMemoryStore::new();
        let p = pancakes(&store);
        let command = RemoveIngredientFromStepCommand {
            recipe_id: p.recipe_id,
            step_id: p.fry_step,
            ingredient_id: p.butter,
        };

        let first = handle(&*store, command.clone()).await.unwrap();
        let second = handle(&*store, command).await.unwrap();

        assert!(first.deleted);
        assert!(!second.deleted);
        assert_eq!(store.association_count(), 3);
        assert_eq!(store.ingredient_count(), 3);
    }

    #[tokio::test]
    async fn test_unknown_pair_succeeds() {
        let store = InMemoryStore::new();
        let response = handle(
            &*store,
            RemoveIngredientFromStepCommand {
                recipe_id: 1,
                step_id: 40,
                ingredient_id: 41,
            },
        )
        .await
        .unwrap();

        assert!(!response.deleted);
    }

    #[tokio::test]
    async fn test_database_failure() {
        let store = InMemoryStore::new();
        store.fail_all();

        let result = handle(
            &*store,
            RemoveIngredientFromStepCommand {
                recipe_id: 1,
                step_id: 2,
                ingredient_id: 3,
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(RemoveIngredientFromStepError::Database { .. })
        ));
    }
}
