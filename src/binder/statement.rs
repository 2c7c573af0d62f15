//! Statement-level binder state.

use std::collections::HashSet;

/// Mutable property record of the statement being compiled.
///
/// Bind-time hooks report which external databases a call touches so the
/// transaction layer can acquire the right locks before execution.
#[derive(Debug, Clone)]
pub struct StatementProperties {
    /// Names of databases the statement modifies.
    pub modified_databases: HashSet<String>,
    /// True while no bound call has reported a modification.
    pub read_only: bool,
}

impl Default for StatementProperties {
    fn default() -> Self {
        StatementProperties {
            modified_databases: HashSet::new(),
            read_only: true,
        }
    }
}

impl StatementProperties {
    /// Creates an empty, read-only property record.
    #[must_use]
    pub fn new() -> Self {
        StatementProperties::default()
    }

    /// Records that the statement modifies `database`.
    pub fn add_modified_database(&mut self, database: impl Into<String>) {
        self.modified_databases.insert(database.into());
        self.read_only = false;
    }
}

/// The enclosing statement binder.
///
/// Function binding only needs the slice of statement state that bind-time
/// hooks may read or write; the rest of statement binding (scopes, name
/// resolution) happens upstream.
#[derive(Debug, Default)]
pub struct Binder {
    properties: StatementProperties,
}

impl Binder {
    /// Creates a binder with empty statement properties.
    #[must_use]
    pub fn new() -> Self {
        Binder::default()
    }

    /// Returns the statement property record.
    #[must_use]
    pub fn properties(&self) -> &StatementProperties {
        &self.properties
    }

    /// Returns mutable access to the statement property record.
    pub fn properties_mut(&mut self) -> &mut StatementProperties {
        &mut self.properties
    }
}
