//! Mahlzeit Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Domain types and shared utilities for the Mahlzeit recipe service.
//!
//! # Overview
//!
//! - **Types**: the recipe aggregate (recipe header, steps, ingredients) and the
//!   catalog entities (ingredients, units) exchanged between the data layer and
//!   the HTTP layer
//! - **Servings**: proportional rescaling of a recipe to another serving count
//! - **Logging**: tracing subscriber setup shared by all binaries
//!
//! # Example
//!
//! ```
//! use mahlzeit_common::types::{Ingredient, Recipe};
//!
//! let mut recipe = Recipe::new(1, "Pancakes", 4);
//! recipe.ingredients.push(Ingredient::new(7, "Flour", 200.0));
//!
//! recipe.with_servings(2);
//! assert_eq!(recipe.servings, 2);
//! assert_eq!(recipe.ingredients[0].amount, 100.0);
//! ```

pub mod logging;
pub mod types;

pub use types::{CatalogIngredient, Ingredient, Recipe, RecipeListEntry, Step, Unit};
