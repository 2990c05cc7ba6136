pub mod get;

pub use get::{GetStepError, GetStepQuery};
