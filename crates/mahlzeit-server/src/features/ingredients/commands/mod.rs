pub mod create;

pub use create::{CreateIngredientCommand, CreateIngredientError};
