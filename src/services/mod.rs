// Service exports
pub mod catalog;
pub mod reference;

pub use catalog::{load_request, load_towns, parse_request, parse_towns, Catalog, CatalogError};
pub use reference::{load_reference, load_reference_or_embedded};
