//! Create recipe command
//!
//! Inserts a recipe header. The servings given here are the base servings all
//! later ingredient amounts are written for.

use chrono::{DateTime, Utc};
use mahlzeit_common::types::duration_secs;
use mediator::Request;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::db::{DbError, NewRecipe, RecipeHeader, RecipeStore};
use crate::error::AppError;
use crate::features::shared::validation::{
    validate_name, validate_servings, validate_text, NameValidationError,
    ServingsValidationError, TextTooLongError, MAX_NAME_LENGTH, MAX_TEXT_LENGTH,
};

/// Command to create a new recipe
///
/// ```rust,ignore
/// let command = CreateRecipeCommand {
///     name: "Pancakes".to_string(),
///     servings: 4,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecipeCommand {
    pub name: String,

    pub servings: i32,

    #[serde(default)]
    pub description: String,

    /// e.g. "makes 12 pancakes"
    #[serde(default)]
    pub servings_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Seconds
    #[serde(default, with = "duration_secs")]
    pub working_time: Duration,

    /// Seconds
    #[serde(default, with = "duration_secs")]
    pub waiting_time: Duration,
}

/// Response from creating a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub servings: i32,
    pub servings_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(with = "duration_secs")]
    pub working_time: Duration,
    #[serde(with = "duration_secs")]
    pub waiting_time: Duration,
    pub created_at: DateTime<Utc>,
}

impl From<RecipeHeader> for CreateRecipeResponse {
    fn from(header: RecipeHeader) -> Self {
        Self {
            id: header.id,
            name: header.name,
            description: header.description,
            servings: header.servings,
            servings_description: header.servings_description,
            source: header.source,
            working_time: header.working_time,
            waiting_time: header.waiting_time,
            created_at: header.created_at,
        }
    }
}

/// Errors that can occur when creating a recipe
#[derive(Debug, thiserror::Error)]
pub enum CreateRecipeError {
    /// Name is empty or too long
    #[error("Name validation failed: {0}")]
    NameValidation(#[from] NameValidationError),

    /// Servings is zero or negative
    #[error("Servings validation failed: {0}")]
    ServingsValidation(#[from] ServingsValidationError),

    /// Description or servings description exceeds its limit
    #[error("{0}")]
    TextTooLong(#[from] TextTooLongError),

    /// Insert failed
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl Request<Result<CreateRecipeResponse, CreateRecipeError>> for CreateRecipeCommand {}

impl crate::cqrs::middleware::Command for CreateRecipeCommand {}

impl CreateRecipeCommand {
    #[tracing::instrument(skip(self), fields(name = %self.name, servings = self.servings))]
    pub fn validate(&self) -> Result<(), CreateRecipeError> {
        validate_name(&self.name, MAX_NAME_LENGTH)?;
        validate_servings(self.servings)?;
        validate_text(&self.description, "description", MAX_TEXT_LENGTH)?;
        validate_text(&self.servings_description, "servings_description", MAX_NAME_LENGTH)?;
        Ok(())
    }
}

impl From<CreateRecipeError> for AppError {
    fn from(err: CreateRecipeError) -> Self {
        match err {
            CreateRecipeError::Database(e) => AppError::Database(e),
            other => AppError::Validation(other.to_string()),
        }
    }
}

#[tracing::instrument(skip(store, command), fields(name = %command.name, servings = command.servings))]
pub async fn handle(
    store: &dyn RecipeStore,
    command: CreateRecipeCommand,
) -> Result<CreateRecipeResponse, CreateRecipeError> {
    command.validate()?;

    let header = store
        .add_recipe(&NewRecipe {
            name: command.name.trim().to_string(),
            description: command.description,
            working_time: command.working_time,
            waiting_time: command.waiting_time,
            source: command.source.filter(|s| !s.trim().is_empty()),
            servings: command.servings,
            servings_description: command.servings_description,
        })
        .await?;

    tracing::info!(recipe_id = header.id, "Recipe created");

    Ok(header.into())
}
