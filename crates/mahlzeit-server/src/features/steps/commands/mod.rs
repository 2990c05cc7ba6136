pub mod add;
pub mod add_ingredient;
pub mod delete;
pub mod remove_ingredient;
pub mod update;

pub use add::{AddStepCommand, AddStepError};
pub use add_ingredient::{
    AddIngredientToStepCommand, AddIngredientToStepError, AddIngredientToStepResponse,
};
pub use delete::{DeleteStepCommand, DeleteStepError, DeleteStepResponse};
pub use remove_ingredient::{
    RemoveIngredientFromStepCommand, RemoveIngredientFromStepError,
    RemoveIngredientFromStepResponse,
};
pub use update::{UpdateStepCommand, UpdateStepError};
