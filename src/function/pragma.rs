//! Pragma (parameter-taking directive) definitions.

use crate::function::FunctionSignature;
use crate::types::LogicalType;

/// A single pragma overload.
///
/// Pragmas are bound against parameter values rather than expressions; the
/// binder casts the values in place to the chosen signature.
#[derive(Debug, Clone)]
pub struct PragmaFunction {
    /// Pragma name.
    pub name: String,
    /// Declared fixed parameter types.
    pub arguments: Vec<LogicalType>,
    /// Trailing variadic parameter type.
    pub varargs: Option<LogicalType>,
}

impl PragmaFunction {
    /// Creates a pragma overload.
    #[must_use]
    pub fn new(name: impl Into<String>, arguments: Vec<LogicalType>) -> Self {
        PragmaFunction {
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

impl FunctionSignature for PragmaFunction {
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
