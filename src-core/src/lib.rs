pub mod db;

pub mod cache;
pub mod coach;
pub mod errors;
pub mod events;
pub mod goals;
pub mod schedule;
pub mod schema;
pub mod tasks;

pub use errors::{Error, Result};
