pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod session;

pub use model::{CatalogEntry, Exercise, SortOrder, Training};
