pub mod create;
pub mod update;

pub use create::{CreateRecipeCommand, CreateRecipeError, CreateRecipeResponse};
pub use update::{UpdateRecipeCommand, UpdateRecipeError, UpdateRecipeResponse};
