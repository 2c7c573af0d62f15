//! Function signatures, overload sets, and bind-time hooks.

mod aggregate;
mod cast_rules;
mod pragma;
mod scalar;
mod signature;
mod table;

pub use aggregate::{AggregateBindFn, AggregateFunction, AggregateType};
pub use cast_rules::{CastRules, DefaultCastRules};
pub use pragma::PragmaFunction;
pub use scalar::{
    BindData, BindExpressionFn, BindExpressionInput, CollationHandling, GetModifiedDatabasesFn,
    ModifiedDatabasesInput, NullHandling, ScalarBindExtendedFn, ScalarBindFn, ScalarBindInput,
    ScalarFunction,
};
pub use signature::{call_signature, FunctionSet, FunctionSignature};
pub use table::TableFunction;

/// Overload set of scalar functions sharing a name.
pub type ScalarFunctionSet = FunctionSet<ScalarFunction>;
/// Overload set of aggregate functions sharing a name.
pub type AggregateFunctionSet = FunctionSet<AggregateFunction>;
/// Overload set of table functions sharing a name.
pub type TableFunctionSet = FunctionSet<TableFunction>;
/// Overload set of pragmas sharing a name.
pub type PragmaFunctionSet = FunctionSet<PragmaFunction>;
