//! Shared validation utilities
//!
//! ```rust,ignore
//! use mahlzeit_server::features::shared::validation::{validate_id, validate_name};
//!
//! validate_id(command.recipe_id, "recipe")?;
//! validate_name(&command.name, MAX_NAME_LENGTH)?;
//! ```

use thiserror::Error;

/// Maximum length of recipe, ingredient and unit names
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum length of free text fields (descriptions, instructions, notes)
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// Errors that can occur during name validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    #[error("Name is required and cannot be empty")]
    Required,

    #[error("Name must be between 1 and {max_length} characters")]
    TooLong { max_length: usize },
}

/// Errors that can occur during ID validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    #[error("Invalid {entity} id {id}: must be a positive integer")]
    NotPositive { entity: &'static str, id: i64 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServingsValidationError {
    #[error("Servings must be greater than 0, got {0}")]
    NotPositive(i32),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmountValidationError {
    #[error("Amount must be a finite number")]
    NotFinite,

    #[error("Amount cannot be negative, got {0}")]
    Negative(f64),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field} must be at most {max_length} characters")]
pub struct TextTooLongError {
    pub field: &'static str,
    pub max_length: usize,
}

/// Validate a name field
///
/// Must not be empty after trimming and must not exceed `max_length` characters.
pub fn validate_name(name: &str, max_length: usize) -> Result<(), NameValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(NameValidationError::Required);
    }

    if name.chars().count() > max_length {
        return Err(NameValidationError::TooLong { max_length });
    }

    Ok(())
}

/// Validate a database ID; identifiers are positive integers.
pub fn validate_id(id: i64, entity: &'static str) -> Result<(), IdValidationError> {
    if id <= 0 {
        return Err(IdValidationError::NotPositive { entity, id });
    }
    Ok(())
}

pub fn validate_servings(servings: i32) -> Result<(), ServingsValidationError> {
    if servings <= 0 {
        return Err(ServingsValidationError::NotPositive(servings));
    }
    Ok(())
}

/// Zero is a valid amount ("a pinch of salt").
pub fn validate_amount(amount: f64) -> Result<(), AmountValidationError> {
    if !amount.is_finite() {
        return Err(AmountValidationError::NotFinite);
    }
    if amount < 0.0 {
        return Err(AmountValidationError::Negative(amount));
    }
    Ok(())
}

pub fn validate_text(
    text: &str,
    field: &'static str,
    max_length: usize,
) -> Result<(), TextTooLongError> {
    if text.chars().count() > max_length {
        return Err(TextTooLongError { field, max_length });
    }
    Ok(())
}
