pub mod create;

pub use create::{CreateUnitCommand, CreateUnitError};
