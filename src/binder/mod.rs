//! Binder module for semantic analysis of function calls.
//!
//! The function binder turns a parsed call site into a fully-typed bound
//! expression node, resolving:
//! - Which overload of a named function applies, by minimal implicit-cast
//!   cost
//! - Argument casts so every child matches the chosen signature
//! - Collation propagation through text-returning calls
//! - Function-specific bind hooks and the NULL short-circuit
//!
//! The output is a bound expression ready for planning.

mod collation;
mod expression;
mod function_binder;
mod statement;

pub use expression::{
    add_cast_to_type, try_evaluate_constant, BoundAggregateExpression, BoundFunctionExpression,
    Expression,
};
pub use function_binder::{BindError, FunctionBinder};
pub use statement::{Binder, StatementProperties};
