//! Scalar function definitions and bind-time hooks.

use std::any::Any;
use std::fmt;

use crate::binder::{Binder, Expression, StatementProperties};
use crate::error::Result;
use crate::function::FunctionSignature;
use crate::types::LogicalType;
use crate::ClientContext;

/// How a function reacts to NULL arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullHandling {
    /// A NULL argument folds the whole call to a typed NULL constant; the
    /// bind hook never observes NULL inputs.
    #[default]
    PropagateNull,
    /// The function handles NULL inputs itself.
    Special,
}

/// How string collations flow through a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollationHandling {
    /// A single non-default argument collation is attached to a text
    /// return type.
    #[default]
    Propagate,
    /// Argument collations are ignored.
    Ignore,
    /// Propagate, then push combinable collation wrappers onto every text
    /// argument.
    PushCombinable,
}

/// Function-specific state produced at bind time, owned by the bound call
/// node and destroyed with it.
pub trait BindData: fmt::Debug + Send + Sync {
    /// Downcasting access for bind-time hooks.
    fn as_any(&self) -> &dyn Any;
}

/// Bind hook: inspects (and may rewrite) the argument list, may specialize
/// the function's declared types, and returns opaque bind data.
pub type ScalarBindFn = fn(
    &ClientContext,
    &mut ScalarFunction,
    &mut Vec<Expression>,
) -> Result<Option<Box<dyn BindData>>>;

/// Input to an extended bind hook, granting access to the enclosing
/// statement binder.
pub struct ScalarBindInput<'a> {
    /// The enclosing statement binder.
    pub binder: &'a mut Binder,
}

/// Bind hook variant with access to the enclosing statement binder. Only
/// invoked when no plain bind hook is present.
pub type ScalarBindExtendedFn = fn(
    &mut ScalarBindInput<'_>,
    &mut ScalarFunction,
    &mut Vec<Expression>,
) -> Result<Option<Box<dyn BindData>>>;

/// Input to a modified-resource reporting hook.
pub struct ModifiedDatabasesInput<'a> {
    /// Bind data produced by the bind hook, if any.
    pub bind_data: Option<&'a dyn BindData>,
    /// The enclosing compile unit's property record.
    pub properties: &'a mut StatementProperties,
}

/// Reports which databases a bound call modifies into the statement
/// properties.
pub type GetModifiedDatabasesFn = fn(&ClientContext, &mut ModifiedDatabasesInput<'_>);

/// Input to an expression-rewrite hook.
pub struct BindExpressionInput<'a> {
    /// Compilation context.
    pub context: &'a ClientContext,
    /// Bind data of the call being rewritten.
    pub bind_data: Option<&'a dyn BindData>,
    /// Cast-adjusted children of the call being rewritten.
    pub children: &'a mut Vec<Expression>,
}

/// Rewrites a bound call into a different expression; returning `None`
/// keeps the bound call node.
pub type BindExpressionFn = fn(BindExpressionInput<'_>) -> Result<Option<Expression>>;

/// A single scalar function overload.
#[derive(Debug, Clone)]
pub struct ScalarFunction {
    /// Function name.
    pub name: String,
    /// Declared fixed parameter types.
    pub arguments: Vec<LogicalType>,
    /// Trailing variadic parameter type.
    pub varargs: Option<LogicalType>,
    /// Declared return type; may be incomplete until the bind hook infers
    /// it.
    pub return_type: LogicalType,
    /// NULL-argument policy.
    pub null_handling: NullHandling,
    /// Collation policy.
    pub collation_handling: CollationHandling,
    /// Bind hook producing function-specific bind data.
    pub bind: Option<ScalarBindFn>,
    /// Bind hook variant with access to the enclosing binder.
    pub bind_extended: Option<ScalarBindExtendedFn>,
    /// Reports which databases a bound call modifies.
    pub get_modified_databases: Option<GetModifiedDatabasesFn>,
    /// Rewrites the bound call into a different expression.
    pub bind_expression: Option<BindExpressionFn>,
}

impl ScalarFunction {
    /// Creates a scalar overload with default policies and no hooks.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        arguments: Vec<LogicalType>,
        return_type: LogicalType,
    ) -> Self {
        ScalarFunction {
            name: name.into(),
            arguments,
            varargs: None,
            return_type,
            null_handling: NullHandling::default(),
            collation_handling: CollationHandling::default(),
            bind: None,
            bind_extended: None,
            get_modified_databases: None,
            bind_expression: None,
        }
    }

    /// Sets the variadic parameter type.
    #[must_use]
    pub fn with_varargs(mut self, varargs: LogicalType) -> Self {
        self.varargs = Some(varargs);
        self
    }

    /// Sets the NULL-argument policy.
    #[must_use]
    pub fn with_null_handling(mut self, null_handling: NullHandling) -> Self {
        self.null_handling = null_handling;
        self
    }

    /// Sets the collation policy.
    #[must_use]
    pub fn with_collation_handling(mut self, collation_handling: CollationHandling) -> Self {
        self.collation_handling = collation_handling;
        self
    }

    /// Sets the bind hook.
    #[must_use]
    pub fn with_bind(mut self, bind: ScalarBindFn) -> Self {
        self.bind = Some(bind);
        self
    }

    /// Sets the extended bind hook.
    #[must_use]
    pub fn with_bind_extended(mut self, bind_extended: ScalarBindExtendedFn) -> Self {
        self.bind_extended = Some(bind_extended);
        self
    }

    /// Sets the modified-databases reporting hook.
    #[must_use]
    pub fn with_modified_databases(mut self, hook: GetModifiedDatabasesFn) -> Self {
        self.get_modified_databases = Some(hook);
        self
    }

    /// Sets the expression-rewrite hook.
    #[must_use]
    pub fn with_bind_expression(mut self, bind_expression: BindExpressionFn) -> Self {
        self.bind_expression = Some(bind_expression);
        self
    }
}

impl FunctionSignature for ScalarFunction {
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
