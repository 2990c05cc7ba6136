//! Ingredient catalog
//!
//! Ingredients are shared by all recipes and unique by name.

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{CreateIngredientCommand, CreateIngredientError};
pub use queries::{GetIngredientError, GetIngredientQuery, ListIngredientsError, ListIngredientsQuery};
pub use routes::ingredients_routes;
