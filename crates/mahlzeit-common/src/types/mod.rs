//! Domain types shared between the data layer and the API
//!
//! The [`Recipe`] aggregate is assembled by the server from several reads and
//! handed to the presentation layer, optionally rescaled with
//! [`Recipe::with_servings`]. Catalog entities ([`CatalogIngredient`], [`Unit`])
//! are global reference data that no recipe owns.

mod catalog;
pub mod duration_secs;
mod recipe;

pub use catalog::{CatalogIngredient, RecipeListEntry, Unit};
pub use recipe::{Ingredient, Recipe, Step};
