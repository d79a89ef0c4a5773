//! Exercise catalog used for name autocompletion.
//!
//! The catalog is fetched once per form session through [`CatalogClient`],
//! frozen into a [`CatalogSnapshot`] and narrowed with [`filter_by_name`]
//! as the user types.

pub mod client;
pub mod filter;
mod snapshot;

pub use client::{CatalogClient, CatalogError};
pub use filter::filter_by_name;
pub use snapshot::CatalogSnapshot;
