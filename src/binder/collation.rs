//! Collation propagation across bound function calls.
//!
//! Runs strictly after overload selection and before cast insertion, so the
//! chosen collation can influence the types casts are inserted against.

use crate::binder::expression::Expression;
use crate::binder::function_binder::BindError;
use crate::error::{Result, RuqlError};
use crate::function::{CollationHandling, ScalarFunction};
use crate::types::LogicalType;
use crate::ClientContext;

/// True if `ty` participates in collation propagation.
fn requires_collation_propagation(ty: &LogicalType) -> bool {
    matches!(ty, LogicalType::Varchar { .. })
}

/// Scans `children` for a single non-default collation.
///
/// # Errors
///
/// Returns [`BindError::IncompatibleCollation`] when two children carry
/// different non-default collations.
pub(crate) fn extract_collation(children: &[Expression]) -> Result<Option<String>> {
    let mut collation: Option<String> = None;
    for child in children {
        let Some(child_collation) = child.return_type().collation() else {
            // not a text column
            continue;
        };
        if child_collation.is_empty() {
            continue;
        }
        match &collation {
            None => collation = Some(child_collation.to_string()),
            Some(existing) if existing != child_collation => {
                return Err(BindError::IncompatibleCollation {
                    left: existing.clone(),
                    right: child_collation.to_string(),
                }
                .into());
            }
            Some(_) => {}
        }
    }
    Ok(collation)
}

/// Attaches the single argument collation, if any, to a text return type.
fn propagate_collations(
    bound_function: &mut ScalarFunction,
    children: &[Expression],
) -> Result<()> {
    if !requires_collation_propagation(&bound_function.return_type) {
        // we only need to propagate if the function returns text
        return Ok(());
    }
    let Some(collation) = extract_collation(children)? else {
        return Ok(());
    };
    bound_function.return_type = LogicalType::varchar_collation(collation);
    Ok(())
}

/// Propagates the argument collation to the return type and pushes
/// combinable enforcement wrappers onto every text argument.
fn push_collations(
    context: &ClientContext,
    bound_function: &mut ScalarFunction,
    children: &mut Vec<Expression>,
) -> Result<()> {
    let Some(collation) = extract_collation(children)? else {
        return Ok(());
    };
    let collation_type = LogicalType::varchar_collation(collation.clone());
    if requires_collation_propagation(&bound_function.return_type) {
        bound_function.return_type = collation_type.clone();
    }
    for child in children.iter_mut() {
        if requires_collation_propagation(child.return_type()) {
            child.set_return_type(collation_type.clone());
            push_collation(context, child, &collation)?;
        }
    }
    Ok(())
}

/// Wraps `slot` in a collation-enforcing node when the catalog registers
/// the collation as combinable.
fn push_collation(context: &ClientContext, slot: &mut Expression, collation: &str) -> Result<()> {
    let Some(def) = context.catalog().collation(collation) else {
        return Err(RuqlError::Catalog(format!(
            "Collation '{collation}' does not exist"
        )));
    };
    if !def.combinable {
        return Ok(());
    }
    let return_type = slot.return_type().clone();
    let child = std::mem::replace(slot, Expression::null_constant(LogicalType::SqlNull));
    *slot = Expression::Collate {
        child: Box::new(child),
        collation: collation.to_string(),
        return_type,
    };
    Ok(())
}

/// Applies the chosen overload's collation policy.
pub(crate) fn handle_collations(
    context: &ClientContext,
    bound_function: &mut ScalarFunction,
    children: &mut Vec<Expression>,
) -> Result<()> {
    match bound_function.collation_handling {
        CollationHandling::Ignore => Ok(()),
        CollationHandling::Propagate => propagate_collations(bound_function, children),
        CollationHandling::PushCombinable => push_collations(context, bound_function, children),
    }
}
