//! Shared utilities for feature modules
//!
//! - **validation**: Input validation utilities
//! - **test_helpers**: In-memory store, fixtures and router helpers (test-only)

pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use validation::{validate_amount, validate_id, validate_name, validate_servings, validate_text};
