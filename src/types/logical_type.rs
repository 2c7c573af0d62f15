//! Logical type definitions for expression binding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Logical (compile-time) type of an expression.
///
/// Types are structural: two types are equal iff their variants and all
/// recursively contained child types are equal. The collation attribute on
/// [`LogicalType::Varchar`] is metadata and does not participate in
/// equality; the collation engine compares it explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogicalType {
    /// Boolean.
    Boolean,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Date (days since Unix epoch).
    Date,
    /// Timestamp (microseconds since Unix epoch).
    Timestamp,
    /// UTF-8 string.
    Varchar {
        /// Collation name; empty means the default binary collation.
        collation: String,
    },
    /// Type of the NULL literal.
    SqlNull,
    /// Placeholder for an argument whose type is not yet known, such as an
    /// unbound prepared-statement parameter.
    Unknown,
    /// Polymorphic wildcard: matches any argument type without a cast.
    /// Optionally carries the concrete type that cast preparation resolves
    /// the position to.
    Any {
        /// Concrete resolution target, if declared.
        target: Option<Box<LogicalType>>,
    },
    /// Variable-length list with a single child type.
    List(Box<LogicalType>),
    /// Fixed-size array with a single child type.
    Array(Box<LogicalType>, usize),
    /// Internal type of an untyped string literal. Must never appear as a
    /// cast target.
    StringLiteral,
    /// Internal type of an untyped integer literal. Must never appear as a
    /// cast target.
    IntegerLiteral,
    /// Lambda argument; removed from the tree before execution.
    Lambda,
}

/// Result of structurally comparing an argument type against a declared
/// parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeComparison {
    /// The types are structurally identical; no cast is needed.
    Identical,
    /// The target is the polymorphic wildcard; no cast is ever needed.
    TargetIsAny,
    /// The types differ; a cast is required.
    Different,
}

impl PartialEq for LogicalType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // collation is metadata, not identity
            (LogicalType::Varchar { .. }, LogicalType::Varchar { .. }) => true,
            (LogicalType::Any { target: a }, LogicalType::Any { target: b }) => a == b,
            (LogicalType::List(a), LogicalType::List(b)) => a == b,
            (LogicalType::Array(a, n), LogicalType::Array(b, m)) => n == m && a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Eq for LogicalType {}

impl LogicalType {
    /// Creates a varchar type with the default collation.
    #[must_use]
    pub fn varchar() -> Self {
        LogicalType::Varchar {
            collation: String::new(),
        }
    }

    /// Creates a varchar type carrying a collation.
    #[must_use]
    pub fn varchar_collation(collation: impl Into<String>) -> Self {
        LogicalType::Varchar {
            collation: collation.into(),
        }
    }

    /// Creates a list type.
    #[must_use]
    pub fn list(child: LogicalType) -> Self {
        LogicalType::List(Box::new(child))
    }

    /// Creates a fixed-size array type.
    #[must_use]
    pub fn array(child: LogicalType, size: usize) -> Self {
        LogicalType::Array(Box::new(child), size)
    }

    /// Creates the wildcard type with no resolution target.
    #[must_use]
    pub fn any() -> Self {
        LogicalType::Any { target: None }
    }

    /// Creates a wildcard type that resolves to `target` when prepared for
    /// casting.
    #[must_use]
    pub fn any_with_target(target: LogicalType) -> Self {
        LogicalType::Any {
            target: Some(Box::new(target)),
        }
    }

    /// Returns true for the unresolved-placeholder type.
    ///
    /// This is the check used both to skip the cast-cost oracle during
    /// resolution and to distinguish a deferred outcome from a genuine
    /// ambiguity; it inspects the top-level tag only.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, LogicalType::Unknown)
    }

    /// Returns the collation attribute if this is a text type.
    #[must_use]
    pub fn collation(&self) -> Option<&str> {
        match self {
            LogicalType::Varchar { collation } => Some(collation),
            _ => None,
        }
    }

    /// Structurally compares `self` (an argument type) against `target`
    /// (a declared parameter type).
    ///
    /// A wildcard target short-circuits before the equality check; matching
    /// container types recurse into their children and return the child
    /// result. Pure and total.
    #[must_use]
    pub fn compare_against(&self, target: &LogicalType) -> TypeComparison {
        if matches!(target, LogicalType::Any { .. }) {
            return TypeComparison::TargetIsAny;
        }
        if self == target {
            return TypeComparison::Identical;
        }
        match (self, target) {
            (LogicalType::List(source_child), LogicalType::List(target_child))
            | (LogicalType::Array(source_child, _), LogicalType::Array(target_child, _)) => {
                source_child.compare_against(target_child)
            }
            _ => TypeComparison::Different,
        }
    }

    /// Returns true if this type is, or recursively contains, the wildcard.
    #[must_use]
    pub fn requires_resolution(&self) -> bool {
        match self {
            LogicalType::Any { .. } => true,
            LogicalType::List(child) | LogicalType::Array(child, _) => child.requires_resolution(),
            _ => false,
        }
    }

    /// Replaces wildcard positions with their carried target type, recursing
    /// into container children. A wildcard with no target is left unchanged.
    ///
    /// Applied to declared parameter types before cast decisions; never
    /// applied to argument types.
    #[must_use]
    pub fn resolve(&self) -> LogicalType {
        match self {
            LogicalType::Any {
                target: Some(target),
            } => (**target).clone(),
            LogicalType::List(child) => LogicalType::list(child.resolve()),
            LogicalType::Array(child, size) => LogicalType::array(child.resolve(), *size),
            _ => self.clone(),
        }
    }

    /// Returns true if the type is fully defined, with no placeholder
    /// positions left to infer.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            LogicalType::Unknown
            | LogicalType::Any { .. }
            | LogicalType::StringLiteral
            | LogicalType::IntegerLiteral => false,
            LogicalType::List(child) | LogicalType::Array(child, _) => child.is_complete(),
            _ => true,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::Boolean => write!(f, "BOOL"),
            LogicalType::Int32 => write!(f, "INT32"),
            LogicalType::Int64 => write!(f, "INT64"),
            LogicalType::Float32 => write!(f, "FLOAT32"),
            LogicalType::Float64 => write!(f, "FLOAT64"),
            LogicalType::Date => write!(f, "DATE"),
            LogicalType::Timestamp => write!(f, "TIMESTAMP"),
            LogicalType::Varchar { .. } => write!(f, "VARCHAR"),
            LogicalType::SqlNull => write!(f, "NULL"),
            LogicalType::Unknown => write!(f, "UNKNOWN"),
            LogicalType::Any { .. } => write!(f, "ANY"),
            LogicalType::List(child) => write!(f, "{child}[]"),
            LogicalType::Array(child, size) => write!(f, "{child}[{size}]"),
            LogicalType::StringLiteral => write!(f, "STRING_LITERAL"),
            LogicalType::IntegerLiteral => write!(f, "INTEGER_LITERAL"),
            LogicalType::Lambda => write!(f, "LAMBDA"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_collation() {
        let plain = LogicalType::varchar();
        let collated = LogicalType::varchar_collation("nocase");
        assert_eq!(plain, collated);
    }

    #[test]
    fn test_equality_recurses_into_containers() {
        let a = LogicalType::list(LogicalType::Int64);
        let b = LogicalType::list(LogicalType::Int64);
        let c = LogicalType::list(LogicalType::Float64);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(
            LogicalType::array(LogicalType::Int64, 3),
            LogicalType::array(LogicalType::Int64, 4)
        );
    }

    #[test]
    fn test_compare_identical() {
        assert_eq!(
            LogicalType::Int64.compare_against(&LogicalType::Int64),
            TypeComparison::Identical
        );
    }

    #[test]
    fn test_compare_any_target() {
        assert_eq!(
            LogicalType::Int64.compare_against(&LogicalType::any()),
            TypeComparison::TargetIsAny
        );
        // the wildcard wins even for a wildcard source
        assert_eq!(
            LogicalType::any().compare_against(&LogicalType::any()),
            TypeComparison::TargetIsAny
        );
    }

    #[test]
    fn test_compare_recurses_into_lists() {
        let source = LogicalType::list(LogicalType::list(LogicalType::Int64));
        let target = LogicalType::list(LogicalType::list(LogicalType::Float64));
        assert_eq!(source.compare_against(&target), TypeComparison::Different);

        let wildcard_child = LogicalType::list(LogicalType::any());
        assert_eq!(
            source.compare_against(&wildcard_child),
            TypeComparison::TargetIsAny
        );
    }

    #[test]
    fn test_compare_mismatched_tags() {
        assert_eq!(
            LogicalType::Int64.compare_against(&LogicalType::varchar()),
            TypeComparison::Different
        );
        assert_eq!(
            LogicalType::list(LogicalType::Int64).compare_against(&LogicalType::Int64),
            TypeComparison::Different
        );
    }

    #[test]
    fn test_resolve_replaces_wildcard_target() {
        let ty = LogicalType::any_with_target(LogicalType::Int64);
        assert_eq!(ty.resolve(), LogicalType::Int64);

        let nested = LogicalType::list(LogicalType::any_with_target(LogicalType::varchar()));
        assert_eq!(nested.resolve(), LogicalType::list(LogicalType::varchar()));

        // no target: unchanged
        let bare = LogicalType::any();
        assert!(matches!(bare.resolve(), LogicalType::Any { target: None }));
    }

    #[test]
    fn test_requires_resolution() {
        assert!(LogicalType::any().requires_resolution());
        assert!(LogicalType::list(LogicalType::any()).requires_resolution());
        assert!(!LogicalType::list(LogicalType::Int64).requires_resolution());
    }

    #[test]
    fn test_is_complete() {
        assert!(LogicalType::Int64.is_complete());
        assert!(LogicalType::SqlNull.is_complete());
        assert!(!LogicalType::Unknown.is_complete());
        assert!(!LogicalType::list(LogicalType::any()).is_complete());
        assert!(!LogicalType::StringLiteral.is_complete());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(LogicalType::Int64.to_string(), "INT64");
        assert_eq!(LogicalType::list(LogicalType::Int64).to_string(), "INT64[]");
        assert_eq!(
            LogicalType::array(LogicalType::Float64, 3).to_string(),
            "FLOAT64[3]"
        );
    }
}
