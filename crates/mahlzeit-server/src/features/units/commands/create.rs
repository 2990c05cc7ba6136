//! Add a measurement unit. Idempotent by name.

use mahlzeit_common::types::Unit;
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeStore};
use crate::error::AppError;
use crate::features::shared::validation::{validate_name, NameValidationError, MAX_NAME_LENGTH};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUnitCommand {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateUnitError {
    #[error("Name validation failed: {0}")]
    NameValidation(#[from] NameValidationError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<Unit, CreateUnitError>> for CreateUnitCommand {}

impl crate::cqrs::middleware::Command for CreateUnitCommand {}

impl CreateUnitCommand {
    pub fn validate(&self) -> Result<(), CreateUnitError> {
        validate_name(&self.name, MAX_NAME_LENGTH)?;
        Ok(())
    }
}

impl From<CreateUnitError> for AppError {
    fn from(err: CreateUnitError) -> Self {
        match err {
            CreateUnitError::Database(e) => AppError::Database(e),
            other => AppError::Validation(other.to_string()),
        }
    }
}

#[tracing::instrument(skip(store, command), fields(name = %command.name))]
pub async fn handle(store: &dyn RecipeStore, command: CreateUnitCommand) -> Result<Unit, CreateUnitError> {
    command.validate()?;

    let unit = store.add_unit(command.name.trim()).await?;

    tracing::info!(unit_id = unit.id, "Unit available");

    Ok(unit)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::InMemoryStore;

    #[tokio::test]
    async fn test_add_unit_is_idempotent() {
        let store = InMemoryStore::new();
        let cmd = CreateUnitCommand {
            name: "tbsp".to_string(),
        };

        let first = handle(&*store, cmd.clone()).await.unwrap();
        let second = handle(&*store, cmd).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.unit_count(), 1);
    }

    #[tokio::test]
    async fn test_rejects_overlong_name() {
        let store = InMemoryStore::new();
        let result = handle(
            &*store,
            CreateUnitCommand {
                name: "x".repeat(MAX_NAME_LENGTH + 1),
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(CreateUnitError::NameValidation(NameValidationError::TooLong { .. }))
        ));
    }
}
