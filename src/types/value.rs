//! Runtime value container used for constant folding and pragma parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuqlError};
use crate::types::LogicalType;

/// Runtime value container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Boolean value.
    Boolean(bool),
    /// 32-bit signed integer value.
    Int32(i32),
    /// 64-bit signed integer value.
    Int64(i64),
    /// 32-bit floating point value.
    Float32(f32),
    /// 64-bit floating point value.
    Float64(f64),
    /// String value.
    Varchar(String),
    /// Date value (days since Unix epoch).
    Date(i32),
    /// Timestamp value (microseconds since Unix epoch).
    Timestamp(i64),
    /// List value.
    List(Vec<Value>),
    /// Null value.
    Null,
}

impl Value {
    /// Returns true if this value is null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the logical type of this value.
    #[must_use]
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Value::Boolean(_) => LogicalType::Boolean,
            Value::Int32(_) => LogicalType::Int32,
            Value::Int64(_) => LogicalType::Int64,
            Value::Float32(_) => LogicalType::Float32,
            Value::Float64(_) => LogicalType::Float64,
            Value::Varchar(_) => LogicalType::varchar(),
            Value::Date(_) => LogicalType::Date,
            Value::Timestamp(_) => LogicalType::Timestamp,
            Value::List(values) => LogicalType::list(
                values
                    .first()
                    .map_or(LogicalType::SqlNull, Value::logical_type),
            ),
            Value::Null => LogicalType::SqlNull,
        }
    }

    /// Attempts to extract an i64 value.
    #[must_use]
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_varchar(&self) -> Option<&str> {
        match self {
            Value::Varchar(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to extract a bool value.
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Casts this value to `target`, producing a new value.
    ///
    /// Null casts to the null of any type. Numeric casts widen without loss
    /// and narrow checked; text targets render, text sources parse. List
    /// values cast element-wise.
    ///
    /// # Errors
    ///
    /// Returns [`RuqlError::Conversion`] when no conversion exists or a
    /// narrowing conversion overflows.
    #[allow(clippy::cast_precision_loss)]
    pub fn cast_as(&self, target: &LogicalType) -> Result<Value> {
        if self.is_null() {
            return Ok(Value::Null);
        }
        if self.logical_type() == *target {
            return Ok(self.clone());
        }
        match (self, target) {
            (value, LogicalType::Any { .. }) => Ok(value.clone()),
            (Value::Int32(v), LogicalType::Int64) => Ok(Value::Int64(i64::from(*v))),
            (Value::Int32(v), LogicalType::Float32) => Ok(Value::Float32(*v as f32)),
            (Value::Int32(v), LogicalType::Float64) => Ok(Value::Float64(f64::from(*v))),
            (Value::Int64(v), LogicalType::Int32) => i32::try_from(*v)
                .map(Value::Int32)
                .map_err(|_| RuqlError::Conversion(format!("Value {v} is out of range for INT32"))),
            (Value::Int64(v), LogicalType::Float32) => Ok(Value::Float32(*v as f32)),
            (Value::Int64(v), LogicalType::Float64) => Ok(Value::Float64(*v as f64)),
            (Value::Float32(v), LogicalType::Float64) => Ok(Value::Float64(f64::from(*v))),
            (Value::Date(days), LogicalType::Timestamp) => {
                Ok(Value::Timestamp(i64::from(*days) * 86_400_000_000))
            }
            (value, LogicalType::Varchar { .. }) => Ok(Value::Varchar(value.to_string())),
            (Value::Varchar(s), LogicalType::Boolean) => s
                .parse()
                .map(Value::Boolean)
                .map_err(|_| RuqlError::Conversion(format!("Cannot parse '{s}' as BOOL"))),
            (Value::Varchar(s), LogicalType::Int32) => s
                .parse()
                .map(Value::Int32)
                .map_err(|_| RuqlError::Conversion(format!("Cannot parse '{s}' as INT32"))),
            (Value::Varchar(s), LogicalType::Int64) => s
                .parse()
                .map(Value::Int64)
                .map_err(|_| RuqlError::Conversion(format!("Cannot parse '{s}' as INT64"))),
            (Value::Varchar(s), LogicalType::Float64) => s
                .parse()
                .map(Value::Float64)
                .map_err(|_| RuqlError::Conversion(format!("Cannot parse '{s}' as FLOAT64"))),
            (Value::List(values), LogicalType::List(child)) => values
                .iter()
                .map(|v| v.cast_as(child))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            (value, target) => Err(RuqlError::Conversion(format!(
                "Cannot cast value of type {} to {target}",
                value.logical_type()
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Varchar(s) => write!(f, "{s}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{v}"),
            Value::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            Value::Null => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_casts_to_anything() {
        assert_eq!(
            Value::Null.cast_as(&LogicalType::Int64).unwrap(),
            Value::Null
        );
        assert_eq!(
            Value::Null.cast_as(&LogicalType::varchar()).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_integer_widening() {
        assert_eq!(
            Value::Int32(7).cast_as(&LogicalType::Int64).unwrap(),
            Value::Int64(7)
        );
        assert_eq!(
            Value::Int32(7).cast_as(&LogicalType::Float64).unwrap(),
            Value::Float64(7.0)
        );
    }

    #[test]
    fn test_integer_narrowing_checks_range() {
        assert_eq!(
            Value::Int64(42).cast_as(&LogicalType::Int32).unwrap(),
            Value::Int32(42)
        );
        assert!(Value::Int64(i64::MAX).cast_as(&LogicalType::Int32).is_err());
    }

    #[test]
    fn test_varchar_round_trips() {
        assert_eq!(
            Value::Int64(42).cast_as(&LogicalType::varchar()).unwrap(),
            Value::Varchar("42".into())
        );
        assert_eq!(
            Value::Varchar("42".into())
                .cast_as(&LogicalType::Int64)
                .unwrap(),
            Value::Int64(42)
        );
        assert!(Value::Varchar("forty-two".into())
            .cast_as(&LogicalType::Int64)
            .is_err());
    }

    #[test]
    fn test_list_casts_element_wise() {
        let list = Value::List(vec![Value::Int32(1), Value::Int32(2)]);
        assert_eq!(
            list.cast_as(&LogicalType::list(LogicalType::Int64))
                .unwrap(),
            Value::List(vec![Value::Int64(1), Value::Int64(2)])
        );
    }

    #[test]
    fn test_infeasible_cast_errors() {
        assert!(Value::Boolean(true).cast_as(&LogicalType::Int64).is_err());
    }
}
