//! Contract tests for collation propagation through bound calls.
//!
//! These tests verify the collation contracts:
//! - A single argument collation propagates to text return types
//! - Combinable collations are pushed onto text arguments as wrappers
//! - Conflicting argument collations are a binding error

use ruql::binder::{BindError, Expression, FunctionBinder};
use ruql::catalog::{CollationDef, FunctionCatalog};
use ruql::function::{CollationHandling, FunctionSet, ScalarFunction, ScalarFunctionSet};
use ruql::types::LogicalType;
use ruql::{ClientContext, RuqlError};

fn context_with_collations(collations: &[(&str, bool)]) -> ClientContext {
    let mut catalog = FunctionCatalog::new();
    for (name, combinable) in collations {
        catalog
            .register_collation(CollationDef::new(*name, *combinable))
            .unwrap();
    }
    ClientContext::new(catalog.into_shared())
}

fn concat_set(collation_handling: CollationHandling) -> ScalarFunctionSet {
    let mut set = FunctionSet::new("concat_op");
    set.push(
        ScalarFunction::new(
            "concat_op",
            vec![LogicalType::varchar(), LogicalType::varchar()],
            LogicalType::varchar(),
        )
        .with_collation_handling(collation_handling),
    );
    set
}

fn collated_column(name: &str, collation: &str) -> Expression {
    Expression::column_ref(name, LogicalType::varchar_collation(collation))
}

#[test]
fn test_collation_propagates_to_return_type() {
    // Contract: a single non-default argument collation is attached to the
    // text return type
    let context = context_with_collations(&[("nocase", true)]);
    let mut binder = FunctionBinder::new(&context);
    let set = concat_set(CollationHandling::Propagate);

    let children = vec![
        collated_column("a", "nocase"),
        Expression::column_ref("b", LogicalType::varchar()),
    ];
    let bound = binder.bind_scalar_function(&set, children, true).unwrap();
    assert_eq!(bound.return_type().collation(), Some("nocase"));
}

#[test]
fn test_no_collation_leaves_return_type_untouched() {
    // Contract: without argument collations propagation is a no-op
    let context = context_with_collations(&[]);
    let mut binder = FunctionBinder::new(&context);
    let set = concat_set(CollationHandling::Propagate);

    let children = vec![
        Expression::column_ref("a", LogicalType::varchar()),
        Expression::column_ref("b", LogicalType::varchar()),
    ];
    let bound = binder.bind_scalar_function(&set, children, true).unwrap();
    assert_eq!(bound.return_type().collation(), Some(""));
}

#[test]
fn test_ignore_policy_drops_argument_collations() {
    // Contract: the ignore policy performs no propagation at all
    let context = context_with_collations(&[("nocase", true)]);
    let mut binder = FunctionBinder::new(&context);
    let set = concat_set(CollationHandling::Ignore);

    let children = vec![
        collated_column("a", "nocase"),
        collated_column("b", "nocase"),
    ];
    let bound = binder.bind_scalar_function(&set, children, true).unwrap();
    assert_eq!(bound.return_type().collation(), Some(""));
}

#[test]
fn test_non_text_return_type_is_never_collated() {
    // Contract: propagation only applies to overloads returning text
    let context = context_with_collations(&[("nocase", true)]);
    let mut binder = FunctionBinder::new(&context);
    let mut set = FunctionSet::new("length");
    set.push(
        ScalarFunction::new("length", vec![LogicalType::varchar()], LogicalType::Int64)
            .with_collation_handling(CollationHandling::Propagate),
    );

    let children = vec![collated_column("a", "nocase")];
    let bound = binder.bind_scalar_function(&set, children, false).unwrap();
    assert_eq!(*bound.return_type(), LogicalType::Int64);
}

#[test]
fn test_push_combinable_rewrites_children() {
    // Contract: matching collations on both children propagate to the
    // return type and every text child gains an enforcement wrapper
    let context = context_with_collations(&[("nocase", true)]);
    let mut binder = FunctionBinder::new(&context);
    let set = concat_set(CollationHandling::PushCombinable);

    let children = vec![
        collated_column("a", "nocase"),
        collated_column("b", "nocase"),
    ];
    let bound = binder.bind_scalar_function(&set, children, true).unwrap();

    assert_eq!(bound.return_type().collation(), Some("nocase"));
    match bound {
        Expression::Function(func) => {
            for child in &func.children {
                match child {
                    Expression::Collate {
                        collation,
                        return_type,
                        ..
                    } => {
                        assert_eq!(collation, "nocase");
                        assert_eq!(return_type.collation(), Some("nocase"));
                    }
                    other => panic!("Expected a collation wrapper, got {other:?}"),
                }
            }
        }
        other => panic!("Expected a bound function, got {other:?}"),
    }
}

#[test]
fn test_push_skips_non_combinable_collations() {
    // Contract: only collations registered as combinable are pushed; the
    // return type still carries the collation
    let context = context_with_collations(&[("de_DE", false)]);
    let mut binder = FunctionBinder::new(&context);
    let set = concat_set(CollationHandling::PushCombinable);

    let children = vec![
        collated_column("a", "de_DE"),
        Expression::column_ref("b", LogicalType::varchar()),
    ];
    let bound = binder.bind_scalar_function(&set, children, true).unwrap();

    assert_eq!(bound.return_type().collation(), Some("de_DE"));
    match bound {
        Expression::Function(func) => {
            for child in &func.children {
                assert!(
                    matches!(child, Expression::ColumnRef { .. }),
                    "non-combinable collations must not be pushed"
                );
            }
        }
        other => panic!("Expected a bound function, got {other:?}"),
    }
}

#[test]
fn test_push_with_unregistered_collation_is_catalog_error() {
    // Contract: pushing an unknown collation fails the lookup
    let context = context_with_collations(&[]);
    let mut binder = FunctionBinder::new(&context);
    let set = concat_set(CollationHandling::PushCombinable);

    let children = vec![
        collated_column("a", "nocase"),
        collated_column("b", "nocase"),
    ];
    let err = binder
        .bind_scalar_function(&set, children, true)
        .unwrap_err();
    assert!(matches!(err, RuqlError::Catalog(_)));
}

#[test]
fn test_incompatible_collations_are_rejected() {
    // Contract: two children carrying different non-default collations are
    // a binding error naming both collations
    let context = context_with_collations(&[("nocase", true), ("de_DE", true)]);
    let mut binder = FunctionBinder::new(&context);
    let set = concat_set(CollationHandling::PushCombinable);

    let children = vec![collated_column("a", "nocase"), collated_column("b", "de_DE")];
    let err = binder
        .bind_scalar_function(&set, children, true)
        .unwrap_err();
    match err {
        RuqlError::Bind(BindError::IncompatibleCollation { left, right }) => {
            assert_eq!(left, "nocase");
            assert_eq!(right, "de_DE");
        }
        other => panic!("Expected IncompatibleCollation, got {other:?}"),
    }
}

#[test]
fn test_collation_survives_cast_insertion() {
    // Contract: collation handling runs before cast insertion, and the
    // collated text types still compare equal to the declared VARCHAR
    // parameters, so no spurious casts appear on top of the wrappers
    let context = context_with_collations(&[("nocase", true)]);
    let mut binder = FunctionBinder::new(&context);
    let set = concat_set(CollationHandling::PushCombinable);

    let children = vec![
        collated_column("a", "nocase"),
        collated_column("b", "nocase"),
    ];
    let bound = binder.bind_scalar_function(&set, children, true).unwrap();
    match bound {
        Expression::Function(func) => {
            for child in &func.children {
                assert!(matches!(child, Expression::Collate { .. }));
            }
        }
        other => panic!("Expected a bound function, got {other:?}"),
    }
}
