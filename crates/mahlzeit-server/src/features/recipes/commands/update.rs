//! Update recipe command
//!
//! Partially updates a recipe header. Only provided fields change. A new
//! `servings` value becomes the base servings: stored ingredient amounts are
//! from then on interpreted as written for that count.

use chrono::{DateTime, Utc};
use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, RecipeHeader, RecipeStore, RecipeUpdate};
use crate::error::AppError;
use crate::features::shared::validation::{
    validate_id, validate_name, validate_servings, validate_text, IdValidationError,
    NameValidationError, ServingsValidationError, TextTooLongError, MAX_NAME_LENGTH,
    MAX_TEXT_LENGTH,
};

/// Command to update a recipe header
///
/// `id` comes from the request path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRecipeCommand {
    #[serde(default, skip_deserializing)]
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Response from updating a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecipeResponse {
    pub id: i64,
    pub name: String,
    pub servings: i32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<RecipeHeader> for UpdateRecipeResponse {
    fn from(header: RecipeHeader) -> Self {
        Self {
            id: header.id,
            name: header.name,
            servings: header.servings,
            description: header.description,
            updated_at: header.updated_at,
        }
    }
}

/// Errors that can occur when updating a recipe
#[derive(Debug, thiserror::Error)]
pub enum UpdateRecipeError {
    /// Recipe ID is not positive
    #[error("{0}")]
    InvalidId(#[from] IdValidationError),

    /// No fields were provided for update
    #[error("At least one field must be provided for update")]
    NoFieldsToUpdate,

    /// New name is empty or too long
    #[error("Name validation failed: {0}")]
    NameValidation(#[from] NameValidationError),

    /// New servings is zero or negative
    #[error("Servings validation failed: {0}")]
    ServingsValidation(#[from] ServingsValidationError),

    /// New description exceeds its limit
    #[error("{0}")]
    TextTooLong(#[from] TextTooLongError),

    /// No recipe with this ID
    #[error("Recipe {0} not found")]
    NotFound(i64),

    /// Update failed for another reason
    #[error("Database error while updating recipe {id}: {source}")]
    Database { id: i64, source: DbError },
}

impl Request<Result<UpdateRecipeResponse, UpdateRecipeError>> for UpdateRecipeCommand {}

impl crate::cqrs::middleware::Command for UpdateRecipeCommand {}

impl UpdateRecipeCommand {
    pub fn validate(&self) -> Result<(), UpdateRecipeError> {
        validate_id(self.id, "recipe")?;

        if self.name.is_none() && self.servings.is_none() && self.description.is_none() {
            return Err(UpdateRecipeError::NoFieldsToUpdate);
        }
        if let Some(name) = &self.name {
            validate_name(name, MAX_NAME_LENGTH)?;
        }
        if let Some(servings) = self.servings {
            validate_servings(servings)?;
        }
        if let Some(description) = &self.description {
            validate_text(description, "description", MAX_TEXT_LENGTH)?;
        }
        Ok(())
    }
}

impl From<UpdateRecipeError> for AppError {
    fn from(err: UpdateRecipeError) -> Self {
        match err {
            UpdateRecipeError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateRecipeError::Database { source, .. } => AppError::Database(source),
            other => AppError::Validation(other.to_string()),
        }
    }
}

#[tracing::instrument(skip(store, command), fields(recipe_id = command.id))]
pub async fn handle(
    store: &dyn RecipeStore,
    command: UpdateRecipeCommand,
) -> Result<UpdateRecipeResponse, UpdateRecipeError> {
    command.validate()?;

    let id = command.id;
    let header = store
        .update_basic_recipe_information(&RecipeUpdate {
            id,
            name: command.name.map(|n| n.trim().to_string()),
            servings: command.servings,
            description: command.description,
        })
        .await
        .map_err(|e| match e {
            DbError::NotFound(_) => UpdateRecipeError::NotFound(id),
            source => UpdateRecipeError::Database { id, source },
        })?;

    tracing::info!(recipe_id = id, servings = header.servings, "Recipe updated");

    Ok(header.into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::InMemoryStore;

    #[test]
    fn test_validation_requires_a_field() {
        let cmd = UpdateRecipeCommand {
            id: 1,
            ..Default::default()
        };
        assert!(matches!(cmd.validate(), Err(UpdateRecipeError::NoFieldsToUpdate)));
    }

    #[test]
    fn test_validation_rejects_bad_id() {
        let cmd = UpdateRecipeCommand {
            id: 0,
            name: Some("Soup".to_string()),
            ..Default::default()
        };
        assert!(matches!(cmd.validate(), Err(UpdateRecipeError::InvalidId(_))));
    }

    #[test]
    fn test_validation_rejects_zero_servings() {
        let cmd = UpdateRecipeCommand {
            id: 1,
            servings: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            cmd.validate(),
            Err(UpdateRecipeError::ServingsValidation(_))
        ));
    }

    #[tokio::test]
    async fn test_name_only_update_keeps_other_fields() {
        let store = InMemoryStore::new();
        let id = store.insert_recipe("Pancakes", 4);
        handle(
            &*store,
            UpdateRecipeCommand {
                id,
                description: Some("Fluffy".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let response = handle(
            &*store,
            UpdateRecipeCommand {
                id,
                name: Some("Crêpes".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(response.name, "Crêpes");
        assert_eq!(response.description, "Fluffy");
        assert_eq!(response.servings, 4);
        assert!(response.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_servings_redefine_base() {
        let store = InMemoryStore::new();
        let id = store.insert_recipe("Pancakes", 4);

        let response = handle(
            &*store,
            UpdateRecipeCommand {
                id,
                servings: Some(100),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(response.servings, 100);
        assert_eq!(store.recipe(id).unwrap().servings, 100);
    }

    #[tokio::test]
    async fn test_missing_recipe_is_not_found() {
        let store = InMemoryStore::new();
        let result = handle(
            &*store,
            UpdateRecipeCommand {
                id: 77,
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(result, Err(UpdateRecipeError::NotFound(77))));
    }
}
