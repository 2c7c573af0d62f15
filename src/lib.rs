//! ruql - SQL function binding
//!
//! The semantic-analysis core that resolves which overload of a named
//! function applies to a call site and rewrites the call's arguments so
//! every argument matches the chosen signature. Sits between the parser
//! and the planner of an embeddable SQL compiler.

pub mod binder;
pub mod catalog;
pub mod error;
pub mod function;
pub mod types;

use std::sync::Arc;

pub use binder::{BindError, Expression, FunctionBinder};
pub use error::{Result, RuqlError};
pub use types::{LogicalType, Value};

use catalog::FunctionCatalog;
use function::{CastRules, DefaultCastRules};

/// Per-connection compilation context.
///
/// Holds the published function catalog and the implicit-cast cost rules.
/// Both are read-only for the lifetime of the context, so any number of
/// binder instances on concurrent connections can share them without
/// locking.
pub struct ClientContext {
    /// Immutable function and collation registry.
    catalog: Arc<FunctionCatalog>,
    /// Implicit-cast cost oracle.
    cast_rules: Box<dyn CastRules>,
}

impl ClientContext {
    /// Creates a context with the default cast rules.
    #[must_use]
    pub fn new(catalog: Arc<FunctionCatalog>) -> Self {
        ClientContext {
            catalog,
            cast_rules: Box::new(DefaultCastRules),
        }
    }

    /// Creates a context with custom cast rules.
    #[must_use]
    pub fn with_cast_rules(catalog: Arc<FunctionCatalog>, cast_rules: Box<dyn CastRules>) -> Self {
        ClientContext {
            catalog,
            cast_rules,
        }
    }

    /// Returns the function catalog.
    #[must_use]
    pub fn catalog(&self) -> &FunctionCatalog {
        &self.catalog
    }

    /// Returns the implicit-cast cost rules.
    #[must_use]
    pub fn cast_rules(&self) -> &dyn CastRules {
        self.cast_rules.as_ref()
    }
}
