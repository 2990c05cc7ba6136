pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateRecipeCommand, CreateRecipeError, CreateRecipeResponse, UpdateRecipeCommand,
    UpdateRecipeError, UpdateRecipeResponse,
};

pub use queries::{
    GetRecipeError, GetRecipeQuery, ListRecipesError, ListRecipesQuery, ListRecipesResponse,
};

pub use routes::recipes_routes;
