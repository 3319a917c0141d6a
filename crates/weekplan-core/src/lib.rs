pub mod calendar;
pub mod client;
pub mod config;
pub mod dismissal;
pub mod error;
pub mod import;
pub mod io;
pub mod label;
pub mod paths;
pub mod reminder;
pub mod store;
pub mod types;
pub mod week;

pub use calendar::WeekKey;
pub use error::{PlannerError, Result};
pub use store::DocumentStore;
