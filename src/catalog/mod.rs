//! Catalog of registered functions and collations.

mod functions;

pub use functions::{CollationDef, FunctionCatalog, DEFAULT_SCHEMA};
