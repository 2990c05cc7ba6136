//! Add an ingredient to a step
//!
//! Writes the (step, ingredient) association in one statement. Missing
//! references are detected from the violated foreign key rather than looked
//! up beforehand:
//!
//! | Constraint | Error |
//! |---|---|
//! | step | [`AddIngredientToStepError::StepNotFound`] (404) |
//! | ingredient | [`AddIngredientToStepError::IngredientNotFound`] (400) |
//! | unit | [`AddIngredientToStepError::UnitNotFound`] (400) |
//!
//! Adding an ingredient that is already on the step replaces its amount,
//! note and unit.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{
    DbError, RecipeStore, StepIngredientParams, STEP_INGREDIENTS_INGREDIENT_FKEY,
    STEP_INGREDIENTS_STEP_FKEY, STEP_INGREDIENTS_UNIT_FKEY,
};
use crate::error::AppError;
use crate::features::shared::validation::{
    validate_amount, validate_id, validate_text, AmountValidationError, IdValidationError,
    TextTooLongError, MAX_TEXT_LENGTH,
};

/// `recipe_id` and `step_id` come from the request path.
///
/// ```json
/// { "ingredient_id": 3, "unit_id": 1, "amount": 250, "note": "lukewarm" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddIngredientToStepCommand {
    #[serde(default, skip_deserializing)]
    pub recipe_id: i64,
    #[serde(default, skip_deserializing)]
    pub step_id: i64,
    pub ingredient_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddIngredientToStepResponse {
    pub step_id: i64,
    pub ingredient_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AddIngredientToStepError {
    /// Step, ingredient or unit ID is not positive
    #[error("{0}")]
    InvalidId(#[from] IdValidationError),

    /// Amount is negative or not finite
    #[error("Amount validation failed: {0}")]
    Amount(#[from] AmountValidationError),

    /// Note exceeds its limit
    #[error("{0}")]
    TextTooLong(#[from] TextTooLongError),

    /// The step foreign key was violated
    #[error("Step {0} not found")]
    StepNotFound(i64),

    /// The ingredient foreign key was violated; bad input, not a missing route
    #[error("Ingredient {0} does not exist")]
    IngredientNotFound(i64),

    /// The unit foreign key was violated
    #[error("Unit {0} does not exist")]
    UnitNotFound(i64),

    /// Write failed for another reason
    #[error("Database error while adding ingredient {ingredient_id} to step {step_id}: {source}")]
    Database {
        step_id: i64,
        ingredient_id: i64,
        source: DbError,
    },
}

impl Request<Result<AddIngredientToStepResponse, AddIngredientToStepError>>
    for AddIngredientToStepCommand
{
}

impl crate::cqrs::middleware::Command for AddIngredientToStepCommand {}

impl AddIngredientToStepCommand {
    #[tracing::instrument(skip(self), fields(step_id = self.step_id, ingredient_id = self.ingredient_id))]
    pub fn validate(&self) -> Result<(), AddIngredientToStepError> {
        validate_id(self.step_id, "step")?;
        validate_id(self.ingredient_id, "ingredient")?;
        if let Some(unit_id) = self.unit_id {
            validate_id(unit_id, "unit")?;
        }
        validate_amount(self.amount)?;
        if let Some(note) = &self.note {
            validate_text(note, "note", MAX_TEXT_LENGTH)?;
        }
        Ok(())
    }

    fn classify(&self, err: DbError) -> AddIngredientToStepError {
        let constraint = err.foreign_key().map(str::to_owned);
        match constraint.as_deref() {
            Some(c) if c == STEP_INGREDIENTS_STEP_FKEY => {
                AddIngredientToStepError::StepNotFound(self.step_id)
            },
            Some(c) if c == STEP_INGREDIENTS_INGREDIENT_FKEY => {
                AddIngredientToStepError::IngredientNotFound(self.ingredient_id)
            },
            Some(c) if c == STEP_INGREDIENTS_UNIT_FKEY => {
                AddIngredientToStepError::UnitNotFound(self.unit_id.unwrap_or_default())
            },
            _ => AddIngredientToStepError::Database {
                step_id: self.step_id,
                ingredient_id: self.ingredient_id,
                source: err,
            },
        }
    }
}

impl From<AddIngredientToStepError> for AppError {
    fn from(err: AddIngredientToStepError) -> Self {
        match err {
            AddIngredientToStepError::StepNotFound(_) => AppError::NotFound(err.to_string()),
            AddIngredientToStepError::IngredientNotFound(_)
            | AddIngredientToStepError::UnitNotFound(_) => AppError::BadRequest(err.to_string()),
            AddIngredientToStepError::Database { source, .. } => AppError::Database(source),
            other => AppError::Validation(other.to_string()),
        }
    }
}

#[tracing::instrument(
    skip(store, command),
    fields(step_id = command.step_id, ingredient_id = command.ingredient_id, unit_id = ?command.unit_id)
)]
pub async fn handle(
    store: &dyn RecipeStore,
    command: AddIngredientToStepCommand,
) -> Result<AddIngredientToStepResponse, AddIngredientToStepError> {
    command.validate()?;

    let params = StepIngredientParams {
        step_id: command.step_id,
        ingredient_id: command.ingredient_id,
        unit_id: command.unit_id,
        amount: command.amount,
        note: command.note.clone().filter(|n| !n.trim().is_empty()),
    };

    if let Err(e) = store.add_ingredient_to_step(&params).await {
        let err = command.classify(e);
        tracing::warn!(error = %err, "Adding ingredient to step failed");
        return Err(err);
    }

    tracing::info!(
        step_id = params.step_id,
        ingredient_id = params.ingredient_id,
        amount = params.amount,
        "Ingredient added to step"
    );

    Ok(AddIngredientToStepResponse {
        step_id: params.step_id,
        ingredient_id: params.ingredient_id,
        unit_id: params.unit_id,
        amount: params.amount,
        note: params.note,
    })
}
