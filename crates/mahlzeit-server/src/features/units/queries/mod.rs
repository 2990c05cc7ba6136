pub mod list;

pub use list::{ListUnitsError, ListUnitsQuery};
