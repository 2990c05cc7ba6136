pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use commands::{
    AddIngredientToStepCommand, AddIngredientToStepError, AddIngredientToStepResponse,
    AddStepCommand, AddStepError, DeleteStepCommand, DeleteStepError, DeleteStepResponse,
    RemoveIngredientFromStepCommand, RemoveIngredientFromStepError,
    RemoveIngredientFromStepResponse, UpdateStepCommand, UpdateStepError,
};
pub use queries::{GetStepError, GetStepQuery};
pub use routes::steps_routes;
pub use types::StepResponse;
