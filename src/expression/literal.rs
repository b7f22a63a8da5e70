use ordered_float::NotNan;
use serde_json::Value;
use std::fmt::{self, Display};

use crate::database::ColumnType;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(NotNan<f64>),
    Bool(bool),
    Null,
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::Number(serde_json::Number::from(*i)),
            Literal::Float(f) => serde_json::Number::from_f64(f.into_inner()).map(Value::Number).unwrap_or(Value::Null),
            Literal::String(s) => Value::String(s.clone()),
        }
    }

    /// Element type of the literal; `None` for NULL.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Literal::Null => None,
            Literal::Bool(_) => Some(ColumnType::Boolean),
            Literal::Int(_) => Some(ColumnType::Integer),
            Literal::Float(_) => Some(ColumnType::Float),
            Literal::String(_) => Some(ColumnType::Text),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s),
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(n) => write!(f, "{}", n.into_inner()),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "NULL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_to_value() {
        assert_eq!(Literal::Int(7).to_value(), json!(7));
        assert_eq!(Literal::Float(NotNan::new(1.5).unwrap()).to_value(), json!(1.5));
        assert_eq!(Literal::String("x".into()).to_value(), json!("x"));
        assert_eq!(Literal::Null.to_value(), Value::Null);
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::String("x".into()).to_string(), "'x'");
        assert_eq!(Literal::Null.to_string(), "NULL");
        assert_eq!(Literal::Null.column_type(), None);
    }
}
