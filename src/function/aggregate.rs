//! Aggregate function definitions.

use crate::binder::Expression;
use crate::error::Result;
use crate::function::{BindData, FunctionSignature};
use crate::types::LogicalType;
use crate::ClientContext;

/// Distinctness of an aggregate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregateType {
    /// Aggregate over all input rows.
    #[default]
    NonDistinct,
    /// Aggregate over distinct inputs only.
    Distinct,
}

/// Aggregate bind hook. The hook may absorb trailing argument expressions
/// (e.g. an ordering modifier); the binder truncates the child list to the
/// declared fixed-parameter count afterwards.
pub type AggregateBindFn = fn(
    &ClientContext,
    &mut AggregateFunction,
    &mut Vec<Expression>,
) -> Result<Option<Box<dyn BindData>>>;

/// A single aggregate function overload.
#[derive(Debug, Clone)]
pub struct AggregateFunction {
    /// Function name.
    pub name: String,
    /// Declared fixed parameter types.
    pub arguments: Vec<LogicalType>,
    /// Trailing variadic parameter type.
    pub varargs: Option<LogicalType>,
    /// Declared return type.
    pub return_type: LogicalType,
    /// Bind hook producing function-specific bind data.
    pub bind: Option<AggregateBindFn>,
}

impl AggregateFunction {
    /// Creates an aggregate overload with no hooks.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        arguments: Vec<LogicalType>,
        return_type: LogicalType,
    ) -> Self {
        AggregateFunction {
            name: name.into(),
            arguments,
            varargs: None,
            return_type,
            bind: None,
        }
    }

    /// Sets the variadic parameter type.
    #[must_use]
    pub fn with_varargs(mut self, varargs: LogicalType) -> Self {
        self.varargs = Some(varargs);
        self
    }

    /// Sets the bind hook.
    #[must_use]
    pub fn with_bind(mut self, bind: AggregateBindFn) -> Self {
        self.bind = Some(bind);
        self
    }
}

impl FunctionSignature for AggregateFunction {
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

    fn return_type(&self) -> Option<&LogicalType> {
        Some(&self.return_type)
    }
}
