use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Element type of a dataset column.
///
/// Array columns use the same classification for their leaves; array-ness
/// and dimensions live on [`ColumnMetadata`](crate::ColumnMetadata).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// true / false
    Boolean,
    /// Integer number
    Integer,
    /// Floating-point number
    Float,
    /// UTF-8 text
    Text,
    /// Accepts every value; used by `coalesce` over mixed inputs
    Any,
}

impl ColumnType {
    /// Classify a serde_json `Value`.
    ///
    /// `null`, arrays and objects have no element type of their own and
    /// return `None`.
    pub fn of_value(v: &Value) -> Option<ColumnType> {
        match v {
            Value::Bool(_) => Some(ColumnType::Boolean),
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Some(ColumnType::Integer)
                } else {
                    Some(ColumnType::Float)
                }
            }
            Value::String(_) => Some(ColumnType::Text),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Whether a scalar value may be stored in a column of this type.
    ///
    /// `null` is accepted by every type and integers are accepted by
    /// `Float` columns.
    pub fn accepts(&self, v: &Value) -> bool {
        if v.is_null() || *self == ColumnType::Any {
            return true;
        }
        match (self, ColumnType::of_value(v)) {
            (ColumnType::Float, Some(ColumnType::Integer)) => true,
            (ty, Some(found)) => *ty == found,
            (_, None) => false,
        }
    }

    /// Common representative of two types.
    ///
    /// `Integer` + `Float` -> `Float`; any other pair of different types
    /// widens to `Any`.
    pub fn promote(a: ColumnType, b: ColumnType) -> ColumnType {
        use ColumnType::*;
        if a == b { return a; }
        match (a, b) {
            (Integer, Float) | (Float, Integer) => Float,
            _ => Any,
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Any => "any",
        };
        f.write_str(name)
    }
}
