//! Cost-based function overload resolution and call binding.

use crate::binder::collation::handle_collations;
use crate::binder::expression::{
    add_cast_to_type, try_evaluate_constant, BoundAggregateExpression, BoundFunctionExpression,
    Expression,
};
use crate::binder::statement::Binder;
use crate::error::{Result, RuqlError};
use crate::function::{
    call_signature, AggregateFunction, AggregateType, BindExpressionInput, FunctionSet,
    FunctionSignature, ModifiedDatabasesInput, NullHandling, PragmaFunctionSet, ScalarBindInput,
    ScalarFunction, ScalarFunctionSet,
};
use crate::types::{LogicalType, TypeComparison, Value};
use crate::ClientContext;

/// Errors raised while binding a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// No overload accepts the argument types.
    NoMatchingFunction {
        /// Name the call was made under.
        name: String,
        /// Rendered argument types of the call.
        arguments: Vec<String>,
        /// Rendered signature of every registered overload.
        candidates: Vec<String>,
    },
    /// Several fully-resolved overloads tie at the minimal cast cost.
    AmbiguousFunction {
        /// Rendered call site.
        call: String,
        /// Rendered signatures of the tied overloads only.
        candidates: Vec<String>,
    },
    /// An argument type is not yet known; retry once type inference has
    /// resolved every call-site argument. Not a user-facing error.
    UnresolvedParameters,
    /// Two arguments carry different non-default collations.
    IncompatibleCollation {
        /// First collation encountered.
        left: String,
        /// The conflicting collation.
        right: String,
    },
    /// A hook required the enclosing statement binder but the function
    /// binder was constructed without one. Indicates a caller bug.
    MissingBinderContext(String),
    /// An overload declared its parameter or return type from an
    /// unresolved literal. Indicates a function-declaration bug.
    InvalidLiteralPlaceholder(String),
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindError::NoMatchingFunction {
                name,
                arguments,
                candidates,
            } => {
                write!(
                    f,
                    "No function matches the given name and argument types '{}({})'. \
                     You might need to add explicit type casts.",
                    name,
                    arguments.join(", ")
                )?;
                if !candidates.is_empty() {
                    write!(f, "\n\tCandidate functions:")?;
                    for candidate in candidates {
                        write!(f, "\n\t{candidate}")?;
                    }
                }
                Ok(())
            }
            BindError::AmbiguousFunction { call, candidates } => {
                write!(
                    f,
                    "Could not choose a best candidate function for the function call \"{call}\". \
                     In order to select one, please add explicit type casts.\n\tCandidate functions:"
                )?;
                for candidate in candidates {
                    write!(f, "\n\t{candidate}")?;
                }
                Ok(())
            }
            BindError::UnresolvedParameters => {
                write!(f, "Parameter types could not be resolved")
            }
            BindError::IncompatibleCollation { left, right } => {
                write!(
                    f,
                    "Cannot combine types with different collation: \"{left}\" and \"{right}\""
                )
            }
            BindError::MissingBinderContext(name) => {
                write!(
                    f,
                    "Function '{name}' has an extended bind callback but the function binder \
                     was created without a binder"
                )
            }
            BindError::InvalidLiteralPlaceholder(name) => {
                write!(
                    f,
                    "Function '{name}' declared a literal placeholder type; declare an explicit \
                     type instead"
                )
            }
        }
    }
}

impl std::error::Error for BindError {}

impl BindError {
    /// Returns true if binding should be retried after type inference
    /// completes, rather than reported.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, BindError::UnresolvedParameters)
    }

    /// Returns true for defects in function declarations or caller wiring,
    /// as opposed to errors in the statement being compiled.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            BindError::MissingBinderContext(_) | BindError::InvalidLiteralPlaceholder(_)
        )
    }
}

/// Binds function call sites for one statement.
///
/// One instance processes one call site at a time to completion; argument
/// expressions are exclusively owned and never shared between instances.
/// The catalog and cast rules reached through [`ClientContext`] are
/// immutable while binding runs, so instances on separate connections may
/// resolve against them concurrently without locking.
pub struct FunctionBinder<'a> {
    context: &'a ClientContext,
    binder: Option<&'a mut Binder>,
}

impl<'a> FunctionBinder<'a> {
    /// Creates a function binder without an enclosing statement binder.
    /// Extended bind hooks fail and resource reporting is skipped.
    #[must_use]
    pub fn new(context: &'a ClientContext) -> Self {
        FunctionBinder {
            context,
            binder: None,
        }
    }

    /// Creates a function binder with access to the enclosing statement
    /// binder, enabling extended bind and resource-reporting hooks.
    #[must_use]
    pub fn with_binder(context: &'a ClientContext, binder: &'a mut Binder) -> Self {
        FunctionBinder {
            context,
            binder: Some(binder),
        }
    }

    /// Computes the total implicit-cast cost of calling `func` with
    /// `arguments`, or `None` when the overload is infeasible.
    ///
    /// An unresolved-placeholder argument contributes no cost and, if the
    /// overload is otherwise feasible, pins the total to zero so that an
    /// unknown type can never eliminate an overload by ranking.
    fn bind_function_cost<T: FunctionSignature>(
        &self,
        func: &T,
        arguments: &[LogicalType],
    ) -> Option<u64> {
        if func.varargs().is_some() {
            if arguments.len() < func.arguments().len() {
                // not enough arguments to fulfill the fixed part
                return None;
            }
        } else if arguments.len() != func.arguments().len() {
            return None;
        }
        let mut cost = 0u64;
        let mut has_parameter = false;
        for (i, arg_type) in arguments.iter().enumerate() {
            let target = func.arguments().get(i).or_else(|| func.varargs())?;
            if arg_type.is_unknown() {
                has_parameter = true;
                continue;
            }
            if arg_type == target {
                // exact match: no cast needed
                continue;
            }
            let cast_cost = self
                .context
                .cast_rules()
                .implicit_cast_cost(arg_type, target);
            if cast_cost < 0 {
                // no implicit cast exists
                return None;
            }
            cost += cast_cost.unsigned_abs();
        }
        if has_parameter {
            // defer ranking until the argument types are known
            return Some(0);
        }
        Some(cost)
    }

    /// Scans the overload set for the minimal-cost feasible candidates.
    fn bind_candidates<T: FunctionSignature>(
        &self,
        functions: &FunctionSet<T>,
        arguments: &[LogicalType],
    ) -> Vec<usize> {
        let mut lowest_cost = u64::MAX;
        let mut candidates = Vec::new();
        for (f_idx, func) in functions.functions.iter().enumerate() {
            let Some(cost) = self.bind_function_cost(func, arguments) else {
                // implicit casting was not possible
                continue;
            };
            if cost > lowest_cost {
                continue;
            }
            if cost < lowest_cost {
                candidates.clear();
                lowest_cost = cost;
            }
            candidates.push(f_idx);
        }
        candidates
    }

    /// Resolves which overload of `functions` applies to `arguments`.
    ///
    /// # Errors
    ///
    /// - [`BindError::NoMatchingFunction`] when no overload is feasible,
    ///   listing every registered signature.
    /// - [`BindError::UnresolvedParameters`] when several overloads tie
    ///   while some call-site argument type is still unknown; callers must
    ///   retry after type inference, not report it.
    /// - [`BindError::AmbiguousFunction`] when fully-resolved overloads
    ///   tie, listing the tied signatures.
    pub fn bind_function<T: FunctionSignature>(
        &self,
        name: &str,
        functions: &FunctionSet<T>,
        arguments: &[LogicalType],
    ) -> Result<usize> {
        let candidates = self.bind_candidates(functions, arguments);
        if candidates.is_empty() {
            return Err(BindError::NoMatchingFunction {
                name: name.to_string(),
                arguments: arguments.iter().map(ToString::to_string).collect(),
                candidates: functions
                    .functions
                    .iter()
                    .map(|f| f.signature_string())
                    .collect(),
            }
            .into());
        }
        if candidates.len() > 1 {
            // The tie may only exist because an argument type is not yet
            // known; the check runs against the original call arguments,
            // not the candidates' parameter types.
            if arguments.iter().any(LogicalType::is_unknown) {
                return Err(BindError::UnresolvedParameters.into());
            }
            return Err(BindError::AmbiguousFunction {
                call: call_signature(name, arguments),
                candidates: candidates
                    .iter()
                    .map(|&f_idx| functions.functions[f_idx].signature_string())
                    .collect(),
            }
            .into());
        }
        Ok(candidates[0])
    }

    /// Resolves an overload from argument expressions.
    ///
    /// # Errors
    ///
    /// See [`FunctionBinder::bind_function`].
    pub fn bind_function_from_expressions<T: FunctionSignature>(
        &self,
        name: &str,
        functions: &FunctionSet<T>,
        children: &[Expression],
    ) -> Result<usize> {
        let types = Self::expression_types(children);
        self.bind_function(name, functions, &types)
    }

    /// Collects the return types of `children`.
    #[must_use]
    pub fn expression_types(children: &[Expression]) -> Vec<LogicalType> {
        children
            .iter()
            .map(|child| child.return_type().clone())
            .collect()
    }

    /// Resolves a pragma overload and casts `parameters` in place to the
    /// chosen signature.
    ///
    /// # Errors
    ///
    /// Resolution errors as in [`FunctionBinder::bind_function`], or
    /// [`RuqlError::Conversion`] when a parameter value cannot be cast.
    pub fn bind_pragma_function(
        &self,
        name: &str,
        functions: &PragmaFunctionSet,
        parameters: &mut [Value],
    ) -> Result<usize> {
        let types: Vec<LogicalType> = parameters.iter().map(Value::logical_type).collect();
        let entry = self.bind_function(name, functions, &types)?;
        let function = &functions.functions[entry];
        for (i, parameter) in parameters.iter_mut().enumerate() {
            let Some(target) = function.arguments.get(i).or(function.varargs.as_ref()) else {
                continue;
            };
            *parameter = parameter.cast_as(target)?;
        }
        Ok(entry)
    }

    /// Rewrites `children` so every argument's type matches the declared
    /// parameter types of `function`, wrapping mismatches in casts.
    ///
    /// Declared wildcard positions are resolved to their target types
    /// first; lambda children are never cast. Idempotent: a second pass
    /// over already-adjusted children inserts nothing.
    ///
    /// # Errors
    ///
    /// [`BindError::InvalidLiteralPlaceholder`] when a literal placeholder
    /// type reaches a cast target; this indicates a broken overload
    /// declaration, not a user error.
    pub fn cast_to_function_arguments<T: FunctionSignature>(
        &self,
        function: &mut T,
        children: &mut [Expression],
    ) -> Result<()> {
        for arg in function.arguments_mut().iter_mut() {
            prepare_type_for_cast(arg);
        }
        if let Some(varargs) = function.varargs_mut() {
            prepare_type_for_cast(varargs);
        }

        for (i, child) in children.iter_mut().enumerate() {
            let Some(target) = function.arguments().get(i).or_else(|| function.varargs()) else {
                continue;
            };
            if matches!(
                target,
                LogicalType::StringLiteral | LogicalType::IntegerLiteral
            ) {
                return Err(
                    BindError::InvalidLiteralPlaceholder(function.name().to_string()).into(),
                );
            }
            // lambda children get removed before execution
            if matches!(child.return_type(), LogicalType::Lambda) {
                continue;
            }
            if child.return_type().compare_against(target) == TypeComparison::Different {
                let target = target.clone();
                wrap_in_cast(child, target);
            }
        }
        Ok(())
    }

    /// Binds a scalar call by catalog lookup.
    ///
    /// # Errors
    ///
    /// [`RuqlError::Catalog`] when no such function is registered, or any
    /// error of [`FunctionBinder::bind_scalar_function`].
    pub fn bind_scalar_function_by_name(
        &mut self,
        schema: &str,
        name: &str,
        children: Vec<Expression>,
        is_operator: bool,
    ) -> Result<Expression> {
        let context = self.context;
        let Some(functions) = context.catalog().scalar_function(schema, name) else {
            return Err(RuqlError::Catalog(format!(
                "Scalar function '{schema}.{name}' does not exist"
            )));
        };
        self.bind_scalar_function(functions, children, is_operator)
    }

    /// Resolves and binds a scalar call against an overload set.
    ///
    /// Under the default null-handling policy a NULL argument (literal or
    /// constant-foldable) short-circuits the whole call to a typed NULL
    /// constant before any bind hook runs; the constant takes the
    /// overload's return type when it is complete and the plain NULL type
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Resolution errors as in [`FunctionBinder::bind_function`], plus any
    /// error raised by the overload's hooks, collation handling, or cast
    /// insertion.
    pub fn bind_scalar_function(
        &mut self,
        functions: &ScalarFunctionSet,
        children: Vec<Expression>,
        is_operator: bool,
    ) -> Result<Expression> {
        let types = Self::expression_types(&children);
        let best_function = self.bind_function(&functions.name, functions, &types)?;
        let bound_function = functions.functions[best_function].clone();

        if bound_function.null_handling == NullHandling::PropagateNull {
            let return_type_if_null = if bound_function.return_type.is_complete() {
                bound_function.return_type.clone()
            } else {
                LogicalType::SqlNull
            };
            for child in &children {
                if matches!(child.return_type(), LogicalType::SqlNull) {
                    return Ok(Expression::null_constant(return_type_if_null));
                }
                if !child.is_foldable() {
                    continue;
                }
                let Some(value) = try_evaluate_constant(child) else {
                    continue;
                };
                if value.is_null() {
                    return Ok(Expression::null_constant(return_type_if_null));
                }
            }
        }
        self.bind_scalar_function_overload(bound_function, children, is_operator)
    }

    /// Binds an already selected scalar overload: bind hooks, collation
    /// handling, cast insertion, node construction, and the optional
    /// expression-rewrite hook, in that order.
    ///
    /// # Errors
    ///
    /// [`BindError::MissingBinderContext`] when the overload only has an
    /// extended bind hook and this binder was created without an enclosing
    /// binder; otherwise any error raised by the hooks, collation
    /// handling, or cast insertion.
    pub fn bind_scalar_function_overload(
        &mut self,
        mut bound_function: ScalarFunction,
        mut children: Vec<Expression>,
        is_operator: bool,
    ) -> Result<Expression> {
        let mut bind_data = None;
        if let Some(bind) = bound_function.bind {
            bind_data = bind(self.context, &mut bound_function, &mut children)?;
        } else if let Some(bind_extended) = bound_function.bind_extended {
            let Some(binder) = self.binder.as_deref_mut() else {
                return Err(BindError::MissingBinderContext(bound_function.name.clone()).into());
            };
            let mut input = ScalarBindInput { binder };
            bind_data = bind_extended(&mut input, &mut bound_function, &mut children)?;
        }

        if let Some(get_modified_databases) = bound_function.get_modified_databases {
            if let Some(binder) = self.binder.as_deref_mut() {
                let mut input = ModifiedDatabasesInput {
                    bind_data: bind_data.as_deref(),
                    properties: binder.properties_mut(),
                };
                get_modified_databases(self.context, &mut input);
            }
        }

        handle_collations(self.context, &mut bound_function, &mut children)?;
        self.cast_to_function_arguments(&mut bound_function, &mut children)?;

        let return_type = bound_function.return_type.clone();
        let mut result_func = BoundFunctionExpression {
            function: bound_function,
            children,
            bind_data,
            return_type,
            is_operator,
        };
        if let Some(bind_expression) = result_func.function.bind_expression {
            let input = BindExpressionInput {
                context: self.context,
                bind_data: result_func.bind_data.as_deref(),
                children: &mut result_func.children,
            };
            if let Some(replacement) = bind_expression(input)? {
                // the rewrite replaces the bound call entirely
                return Ok(replacement);
            }
        }
        Ok(Expression::Function(result_func))
    }

    /// Binds an aggregate overload.
    ///
    /// The bind hook may absorb trailing arguments (an ordering modifier,
    /// for instance); afterwards the child list is truncated to the
    /// declared fixed-parameter count, since absorbed arguments are not
    /// part of the executed children. Aggregates have no null
    /// short-circuit and no collation handling.
    ///
    /// # Errors
    ///
    /// Any error raised by the bind hook or cast insertion.
    pub fn bind_aggregate_function(
        &mut self,
        mut bound_function: AggregateFunction,
        mut children: Vec<Expression>,
        filter: Option<Box<Expression>>,
        aggregate_type: AggregateType,
    ) -> Result<BoundAggregateExpression> {
        let mut bind_data = None;
        if let Some(bind) = bound_function.bind {
            bind_data = bind(self.context, &mut bound_function, &mut children)?;
            // the bind hook may have absorbed trailing arguments
            children.truncate(bound_function.arguments.len());
        }

        self.cast_to_function_arguments(&mut bound_function, &mut children)?;

        let return_type = bound_function.return_type.clone();
        Ok(BoundAggregateExpression {
            function: bound_function,
            children,
            filter,
            bind_data,
            return_type,
            aggregate_type,
        })
    }
}

/// Resolves wildcard positions in a declared parameter type, in place.
fn prepare_type_for_cast(ty: &mut LogicalType) {
    if ty.requires_resolution() {
        *ty = ty.resolve();
    }
}

/// Replaces `slot` with a cast of its current expression to `target`,
/// moving the original expression into the wrapper.
fn wrap_in_cast(slot: &mut Expression, target: LogicalType) {
    let child = std::mem::replace(slot, Expression::null_constant(LogicalType::SqlNull));
    *slot = add_cast_to_type(child, target, false);
}
