//! Implicit-cast cost rules.

use crate::types::LogicalType;

/// Cost oracle for implicit casts.
///
/// A negative result means no implicit cast exists; a non-negative result
/// ranks the cast, lower being preferred. Implementations must be safe for
/// unsynchronized concurrent reads: the rule set is never mutated while a
/// binder may be resolving against it.
pub trait CastRules: Send + Sync {
    /// Returns the cost of implicitly casting `from` to `to`, or a negative
    /// value if the cast is infeasible.
    fn implicit_cast_cost(&self, from: &LogicalType, to: &LogicalType) -> i64;
}

/// Ranks how desirable a type is as an implicit-cast destination. Wider
/// numeric types are preferred over text.
fn target_type_cost(ty: &LogicalType) -> i64 {
    match ty {
        LogicalType::Int64 => 101,
        LogicalType::Float64 => 102,
        LogicalType::Int32 => 103,
        LogicalType::Float32 => 110,
        LogicalType::Varchar { .. } => 149,
        _ => 110,
    }
}

/// Default cast rules: lossless numeric widening, date promotion, and a
/// high-cost fallback cast to text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCastRules;

impl CastRules for DefaultCastRules {
    fn implicit_cast_cost(&self, from: &LogicalType, to: &LogicalType) -> i64 {
        if from == to {
            return 0;
        }
        // a wildcard destination accepts anything for free
        if matches!(to, LogicalType::Any { .. }) {
            return 0;
        }
        match (from, to) {
            // NULL and untyped placeholders cast to any concrete type
            (LogicalType::SqlNull | LogicalType::Unknown, _) => target_type_cost(to),
            (LogicalType::StringLiteral, LogicalType::Varchar { .. }) => 1,
            (LogicalType::StringLiteral, _) => target_type_cost(to),
            (
                LogicalType::IntegerLiteral,
                LogicalType::Int32 | LogicalType::Int64 | LogicalType::Float32 | LogicalType::Float64,
            ) => target_type_cost(to),
            (LogicalType::Int32, LogicalType::Int64 | LogicalType::Float32 | LogicalType::Float64)
            | (LogicalType::Int64, LogicalType::Float32 | LogicalType::Float64)
            | (LogicalType::Float32, LogicalType::Float64)
            | (LogicalType::Date, LogicalType::Timestamp) => target_type_cost(to),
            (LogicalType::List(from_child), LogicalType::List(to_child)) => {
                self.implicit_cast_cost(from_child, to_child)
            }
            (LogicalType::Array(from_child, from_size), LogicalType::Array(to_child, to_size)) => {
                if from_size == to_size {
                    self.implicit_cast_cost(from_child, to_child)
                } else {
                    -1
                }
            }
            // everything renders to text as a last resort
            (_, LogicalType::Varchar { .. }) => target_type_cost(to),
            _ => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_types_are_free() {
        let rules = DefaultCastRules;
        assert_eq!(
            rules.implicit_cast_cost(&LogicalType::Int64, &LogicalType::Int64),
            0
        );
    }

    #[test]
    fn test_widening_is_cheaper_than_text() {
        let rules = DefaultCastRules;
        let to_int64 = rules.implicit_cast_cost(&LogicalType::Int32, &LogicalType::Int64);
        let to_varchar = rules.implicit_cast_cost(&LogicalType::Int32, &LogicalType::varchar());
        assert!(to_int64 >= 0);
        assert!(to_varchar >= 0);
        assert!(to_int64 < to_varchar);
    }

    #[test]
    fn test_narrowing_is_infeasible() {
        let rules = DefaultCastRules;
        assert!(rules.implicit_cast_cost(&LogicalType::Int64, &LogicalType::Int32) < 0);
        assert!(rules.implicit_cast_cost(&LogicalType::Float64, &LogicalType::Int64) < 0);
    }

    #[test]
    fn test_null_casts_to_any_concrete_type() {
        let rules = DefaultCastRules;
        assert!(rules.implicit_cast_cost(&LogicalType::SqlNull, &LogicalType::Int64) >= 0);
        assert!(rules.implicit_cast_cost(&LogicalType::SqlNull, &LogicalType::varchar()) >= 0);
    }

    #[test]
    fn test_wildcard_destination_is_free() {
        let rules = DefaultCastRules;
        assert_eq!(
            rules.implicit_cast_cost(&LogicalType::Boolean, &LogicalType::any()),
            0
        );
    }

    #[test]
    fn test_list_cost_recurses_into_children() {
        let rules = DefaultCastRules;
        let int_list = LogicalType::list(LogicalType::Int32);
        let long_list = LogicalType::list(LogicalType::Int64);
        let bool_list = LogicalType::list(LogicalType::Boolean);
        assert!(rules.implicit_cast_cost(&int_list, &long_list) > 0);
        assert!(rules.implicit_cast_cost(&int_list, &bool_list) < 0);
    }

    #[test]
    fn test_array_sizes_must_match() {
        let rules = DefaultCastRules;
        let three = LogicalType::array(LogicalType::Int32, 3);
        let four = LogicalType::array(LogicalType::Int64, 4);
        assert!(rules.implicit_cast_cost(&three, &four) < 0);
    }
}
