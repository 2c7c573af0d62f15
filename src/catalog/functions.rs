//! Registry of function overload sets and collations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, RuqlError};
use crate::function::{
    AggregateFunctionSet, PragmaFunctionSet, ScalarFunctionSet, TableFunctionSet,
};

/// Schema functions are registered under when no schema is given.
pub const DEFAULT_SCHEMA: &str = "main";

/// A named collation registered in the catalog.
#[derive(Debug, Clone)]
pub struct CollationDef {
    /// Collation name, e.g. `nocase`.
    pub name: String,
    /// Whether enforcement wrappers for this collation can be combined with
    /// other collation wrappers on the same expression.
    pub combinable: bool,
}

impl CollationDef {
    /// Creates a collation definition.
    #[must_use]
    pub fn new(name: impl Into<String>, combinable: bool) -> Self {
        CollationDef {
            name: name.into(),
            combinable,
        }
    }
}

/// Central registry of all function overload sets.
///
/// The catalog is mutable while the system registers its functions, then
/// published with [`FunctionCatalog::into_shared`] as an immutable snapshot
/// that any number of binder instances read concurrently without locking.
#[derive(Debug, Clone, Default)]
pub struct FunctionCatalog {
    /// Scalar function sets, keyed by qualified name.
    scalar_functions: HashMap<String, ScalarFunctionSet>,
    /// Aggregate function sets.
    aggregate_functions: HashMap<String, AggregateFunctionSet>,
    /// Table function sets.
    table_functions: HashMap<String, TableFunctionSet>,
    /// Pragma function sets.
    pragma_functions: HashMap<String, PragmaFunctionSet>,
    /// Collation definitions, keyed by collation name.
    collations: HashMap<String, CollationDef>,
}

fn qualified(schema: &str, name: &str) -> String {
    format!("{schema}.{name}")
}

impl FunctionCatalog {
    /// Creates a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        FunctionCatalog::default()
    }

    /// Publishes the catalog as an immutable shared snapshot.
    #[must_use]
    pub fn into_shared(self) -> Arc<FunctionCatalog> {
        Arc::new(self)
    }

    /// Registers a scalar overload set under the default schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a set with the same name already exists.
    pub fn register_scalar_function(&mut self, set: ScalarFunctionSet) -> Result<()> {
        let key = qualified(DEFAULT_SCHEMA, &set.name);
        if self.scalar_functions.contains_key(&key) {
            return Err(RuqlError::Catalog(format!(
                "Scalar function '{}' already exists",
                set.name
            )));
        }
        self.scalar_functions.insert(key, set);
        Ok(())
    }

    /// Registers an aggregate overload set under the default schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a set with the same name already exists.
    pub fn register_aggregate_function(&mut self, set: AggregateFunctionSet) -> Result<()> {
        let key = qualified(DEFAULT_SCHEMA, &set.name);
        if self.aggregate_functions.contains_key(&key) {
            return Err(RuqlError::Catalog(format!(
                "Aggregate function '{}' already exists",
                set.name
            )));
        }
        self.aggregate_functions.insert(key, set);
        Ok(())
    }

    /// Registers a table function set under the default schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a set with the same name already exists.
    pub fn register_table_function(&mut self, set: TableFunctionSet) -> Result<()> {
        let key = qualified(DEFAULT_SCHEMA, &set.name);
        if self.table_functions.contains_key(&key) {
            return Err(RuqlError::Catalog(format!(
                "Table function '{}' already exists",
                set.name
            )));
        }
        self.table_functions.insert(key, set);
        Ok(())
    }

    /// Registers a pragma function set under the default schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a set with the same name already exists.
    pub fn register_pragma_function(&mut self, set: PragmaFunctionSet) -> Result<()> {
        let key = qualified(DEFAULT_SCHEMA, &set.name);
        if self.pragma_functions.contains_key(&key) {
            return Err(RuqlError::Catalog(format!(
                "Pragma function '{}' already exists",
                set.name
            )));
        }
        self.pragma_functions.insert(key, set);
        Ok(())
    }

    /// Registers a collation definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the collation already exists.
    pub fn register_collation(&mut self, def: CollationDef) -> Result<()> {
        if self.collations.contains_key(&def.name) {
            return Err(RuqlError::Catalog(format!(
                "Collation '{}' already exists",
                def.name
            )));
        }
        self.collations.insert(def.name.clone(), def);
        Ok(())
    }

    /// Retrieves a scalar overload set.
    #[must_use]
    pub fn scalar_function(&self, schema: &str, name: &str) -> Option<&ScalarFunctionSet> {
        self.scalar_functions.get(&qualified(schema, name))
    }

    /// Retrieves an aggregate overload set.
    #[must_use]
    pub fn aggregate_function(&self, schema: &str, name: &str) -> Option<&AggregateFunctionSet> {
        self.aggregate_functions.get(&qualified(schema, name))
    }

    /// Retrieves a table function set.
    #[must_use]
    pub fn table_function(&self, schema: &str, name: &str) -> Option<&TableFunctionSet> {
        self.table_functions.get(&qualified(schema, name))
    }

    /// Retrieves a pragma function set.
    #[must_use]
    pub fn pragma_function(&self, schema: &str, name: &str) -> Option<&PragmaFunctionSet> {
        self.pragma_functions.get(&qualified(schema, name))
    }

    /// Retrieves a collation definition.
    #[must_use]
    pub fn collation(&self, name: &str) -> Option<&CollationDef> {
        self.collations.get(name)
    }
}
