pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{CreateUnitCommand, CreateUnitError};
pub use queries::{ListUnitsError, ListUnitsQuery};
pub use routes::units_routes;
