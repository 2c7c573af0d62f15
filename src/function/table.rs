//! Table-producing function definitions.

use crate::function::FunctionSignature;
use crate::types::LogicalType;

/// A single table function overload.
///
/// Table functions produce a relation rather than a scalar value; overload
/// resolution for them works on the positional argument types alone, and
/// schema binding of the produced relation happens upstream.
#[derive(Debug, Clone)]
pub struct TableFunction {
    /// Function name.
    pub name: String,
    /// Declared fixed parameter types.
    pub arguments: Vec<LogicalType>,
    /// Trailing variadic parameter type.
    pub varargs: Option<LogicalType>,
}

impl TableFunction {
    /// Creates a table function overload.
    #[must_use]
    pub fn new(name: impl Into<String>, arguments: Vec<LogicalType>) -> Self {
        TableFunction {
            name: name.into(),
            arguments,
            varargs: None,
        }
    }

    /// Sets the variadic parameter type.
    #[must_use]
    pub fn with_varargs(mut self, varargs: LogicalType) -> Self {
        self.varargs = Some(varargs);
        self
    }
}

impl FunctionSignature for TableFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn arguments(&self) -> &[LogicalType] {
        &self.arguments
    }

    fn arguments_mut(&mut self) -> &mut Vec<LogicalType> {
        &mut self.arguments
    }

    fn varargs(&self) -> Option<&LogicalType> {
        self.varargs.as_ref()
    }

    fn varargs_mut(&mut self) -> Option<&mut LogicalType> {
        self.varargs.as_mut()
    }
}
