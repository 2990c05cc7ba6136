pub mod get;
pub mod list;

pub use get::{GetRecipeError, GetRecipeQuery};
pub use list::{ListRecipesError, ListRecipesQuery, ListRecipesResponse};
