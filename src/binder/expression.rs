//! Bound expression definitions.

use crate::function::{AggregateFunction, AggregateType, BindData, ScalarFunction};
use crate::types::{LogicalType, Value};

/// Bound expression after semantic analysis.
///
/// Every node exclusively owns its children; wrapping an argument in a cast
/// moves the original node into the wrapper.
#[derive(Debug)]
pub enum Expression {
    /// Literal constant.
    Constant {
        value: Value,
        return_type: LogicalType,
    },

    /// Reference to a column resolved upstream.
    ColumnRef {
        name: String,
        return_type: LogicalType,
    },

    /// Prepared-statement parameter; its type stays [`LogicalType::Unknown`]
    /// until inference supplies one.
    Parameter {
        index: usize,
        return_type: LogicalType,
    },

    /// Implicit or explicit cast.
    Cast {
        child: Box<Expression>,
        return_type: LogicalType,
        try_cast: bool,
    },

    /// Collation-enforcing wrapper around a text expression.
    Collate {
        child: Box<Expression>,
        collation: String,
        return_type: LogicalType,
    },

    /// Lambda argument; stripped from the tree before execution.
    Lambda {
        parameters: Vec<String>,
        body: Box<Expression>,
        return_type: LogicalType,
    },

    /// Bound scalar function call.
    Function(BoundFunctionExpression),

    /// Bound aggregate call.
    Aggregate(BoundAggregateExpression),
}

impl Expression {
    /// Creates a constant expression typed after its value.
    #[must_use]
    pub fn constant(value: Value) -> Self {
        let return_type = value.logical_type();
        Expression::Constant { value, return_type }
    }

    /// Creates a constant expression with an explicit type.
    #[must_use]
    pub fn typed_constant(value: Value, return_type: LogicalType) -> Self {
        Expression::Constant { value, return_type }
    }

    /// Creates a NULL constant of the given type.
    #[must_use]
    pub fn null_constant(return_type: LogicalType) -> Self {
        Expression::Constant {
            value: Value::Null,
            return_type,
        }
    }

    /// Creates a column reference.
    #[must_use]
    pub fn column_ref(name: impl Into<String>, return_type: LogicalType) -> Self {
        Expression::ColumnRef {
            name: name.into(),
            return_type,
        }
    }

    /// Creates an unresolved prepared-statement parameter.
    #[must_use]
    pub fn parameter(index: usize) -> Self {
        Expression::Parameter {
            index,
            return_type: LogicalType::Unknown,
        }
    }

    /// Creates a lambda argument.
    #[must_use]
    pub fn lambda(parameters: Vec<String>, body: Expression) -> Self {
        Expression::Lambda {
            parameters,
            body: Box::new(body),
            return_type: LogicalType::Lambda,
        }
    }

    /// Returns the type this expression evaluates to.
    #[must_use]
    pub fn return_type(&self) -> &LogicalType {
        match self {
            Expression::Constant { return_type, .. }
            | Expression::ColumnRef { return_type, .. }
            | Expression::Parameter { return_type, .. }
            | Expression::Cast { return_type, .. }
            | Expression::Collate { return_type, .. }
            | Expression::Lambda { return_type, .. } => return_type,
            Expression::Function(func) => &func.return_type,
            Expression::Aggregate(aggr) => &aggr.return_type,
        }
    }

    /// Replaces this expression's return type (collation propagation
    /// rewrites argument types in place).
    pub fn set_return_type(&mut self, new_type: LogicalType) {
        match self {
            Expression::Constant { return_type, .. }
            | Expression::ColumnRef { return_type, .. }
            | Expression::Parameter { return_type, .. }
            | Expression::Cast { return_type, .. }
            | Expression::Collate { return_type, .. }
            | Expression::Lambda { return_type, .. } => *return_type = new_type,
            Expression::Function(func) => func.return_type = new_type,
            Expression::Aggregate(aggr) => aggr.return_type = new_type,
        }
    }

    /// Returns true if this expression can be folded to a value at compile
    /// time without executing the query.
    #[must_use]
    pub fn is_foldable(&self) -> bool {
        match self {
            Expression::Constant { .. } => true,
            Expression::Cast { child, .. } | Expression::Collate { child, .. } => {
                child.is_foldable()
            }
            _ => false,
        }
    }
}

/// A fully bound scalar function call.
#[derive(Debug)]
pub struct BoundFunctionExpression {
    /// The selected overload, fully specialized.
    pub function: ScalarFunction,
    /// Cast-adjusted argument expressions.
    pub children: Vec<Expression>,
    /// Function-specific bind state.
    pub bind_data: Option<Box<dyn BindData>>,
    /// Final return type.
    pub return_type: LogicalType,
    /// True if the call was written as an operator.
    pub is_operator: bool,
}

/// A fully bound aggregate call.
#[derive(Debug)]
pub struct BoundAggregateExpression {
    /// The selected overload.
    pub function: AggregateFunction,
    /// Cast-adjusted argument expressions, truncated to the overload's
    /// fixed-parameter count after binding.
    pub children: Vec<Expression>,
    /// FILTER predicate, if the call carries one.
    pub filter: Option<Box<Expression>>,
    /// Function-specific bind state.
    pub bind_data: Option<Box<dyn BindData>>,
    /// Final return type.
    pub return_type: LogicalType,
    /// Distinctness of the call.
    pub aggregate_type: AggregateType,
}

/// Attempts to fold a compile-time-constant expression to a value.
///
/// Folds constants and casts/collations over constants; returns `None` for
/// anything that would require executing the query.
#[must_use]
pub fn try_evaluate_constant(expr: &Expression) -> Option<Value> {
    match expr {
        Expression::Constant { value, .. } => Some(value.clone()),
        Expression::Cast {
            child, return_type, ..
        } => {
            let value = try_evaluate_constant(child)?;
            value.cast_as(return_type).ok()
        }
        Expression::Collate { child, .. } => try_evaluate_constant(child),
        _ => None,
    }
}

/// Wraps `expr` in a cast to `target`, transferring ownership of `expr`
/// into the wrapper.
///
/// No wrapper is added when the types already match, when an untyped
/// parameter can simply adopt the target type, or when a list target's
/// child type is the wildcard.
#[must_use]
pub fn add_cast_to_type(expr: Expression, target: LogicalType, try_cast: bool) -> Expression {
    if let Expression::Parameter { index, return_type } = &expr {
        if return_type.is_unknown() {
            // the parameter adopts the target type instead of being wrapped
            return Expression::Parameter {
                index: *index,
                return_type: target,
            };
        }
    }
    if *expr.return_type() == target {
        return expr;
    }
    if let (LogicalType::List(source_child), LogicalType::List(target_child)) =
        (expr.return_type(), &target)
    {
        if matches!(**target_child, LogicalType::Any { .. }) || source_child == target_child {
            return expr;
        }
    }
    Expression::Cast {
        child: Box::new(expr),
        return_type: target,
        try_cast,
    }
}
