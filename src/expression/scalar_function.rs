use std::fmt::Display;

use serde_json::Value;

use crate::{database::{ColumnMetadata, ColumnType}, expression::ExpressionError};

/// Built-in computed functions usable in a projection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarFunction {
    Upper,
    Lower,
    Trim,
    /// Characters of a string or elements of an array
    Length,
    Abs,
    /// First non-null argument
    Coalesce,
    /// Builds a one-dimensional array from its arguments
    Array,
}

impl ScalarFunction {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarFunction::Upper => "upper",
            ScalarFunction::Lower => "lower",
            ScalarFunction::Trim => "trim",
            ScalarFunction::Length => "length",
            ScalarFunction::Abs => "abs",
            ScalarFunction::Coalesce => "coalesce",
            ScalarFunction::Array => "array",
        }
    }

    /// Infer the output descriptor from the argument descriptors.
    ///
    /// A `None` argument is a NULL constant, which fits any parameter.
    pub fn output(&self, output_name: &str, args: &[Option<ColumnMetadata>]) -> Result<ColumnMetadata, ExpressionError> {
        let mismatch = |expected: &str| ExpressionError::FunctionArgMismatch {
            name: self.name().to_string(),
            expected: expected.to_string(),
            got: args.iter().map(|a| a.as_ref().map(|c| c.ty)).collect(),
        };
        let is_scalar = |a: &Option<ColumnMetadata>, tys: &[ColumnType]| match a {
            None => true,
            Some(c) => !c.is_array && tys.contains(&c.ty),
        };

        match (self, args) {
            (ScalarFunction::Upper | ScalarFunction::Lower | ScalarFunction::Trim, [arg])
                if is_scalar(arg, &[ColumnType::Text]) =>
                    Ok(ColumnMetadata::scalar(output_name, ColumnType::Text)),
            (ScalarFunction::Upper | ScalarFunction::Lower | ScalarFunction::Trim, _) => Err(mismatch("(text)")),

            (ScalarFunction::Length, [arg])
                if is_scalar(arg, &[ColumnType::Text]) || arg.as_ref().is_some_and(|c| c.is_array) =>
                    Ok(ColumnMetadata::scalar(output_name, ColumnType::Integer)),
            (ScalarFunction::Length, _) => Err(mismatch("(text) or (array)")),

            (ScalarFunction::Abs, [arg]) if is_scalar(arg, &[ColumnType::Integer, ColumnType::Float]) => {
                let ty = arg.as_ref().map(|c| c.ty).unwrap_or(ColumnType::Float);
                Ok(ColumnMetadata::scalar(output_name, ty))
            }
            (ScalarFunction::Abs, _) => Err(mismatch("(integer) or (float)")),

            (ScalarFunction::Coalesce, many) if !many.is_empty() => {
                let present = many.iter().flatten().collect::<Vec<_>>();
                let Some(first) = present.first() else {
                    return Ok(ColumnMetadata::scalar(output_name, ColumnType::Any));
                };
                if present.iter().any(|c| c.is_array != first.is_array || c.array_dimensions != first.array_dimensions) {
                    return Err(mismatch("arguments of one shape"));
                }
                let ty = present.iter().fold(first.ty, |acc, c| ColumnType::promote(acc, c.ty));
                Ok(ColumnMetadata::new(output_name, ty, first.is_array, first.array_dimensions.clone()))
            }
            (ScalarFunction::Coalesce, _) => Err(mismatch("at least one argument")),

            (ScalarFunction::Array, many) if !many.is_empty() => {
                if many.iter().flatten().any(|c| c.is_array) {
                    return Err(mismatch("scalar arguments"));
                }
                let ty = many
                    .iter()
                    .flatten()
                    .map(|c| c.ty)
                    .reduce(ColumnType::promote)
                    .unwrap_or(ColumnType::Any);
                Ok(ColumnMetadata::array(output_name, ty, vec![many.len()]))
            }
            (ScalarFunction::Array, _) => Err(mismatch("at least one argument")),
        }
    }

    /// Evaluate over already evaluated arguments. NULL in gives NULL out,
    /// except for `coalesce` and `array`.
    pub fn eval(&self, args: Vec<Value>) -> Value {
        match (self, args.as_slice()) {
            (ScalarFunction::Upper, [Value::String(s)]) => Value::String(s.to_uppercase()),
            (ScalarFunction::Lower, [Value::String(s)]) => Value::String(s.to_lowercase()),
            (ScalarFunction::Trim, [Value::String(s)]) => Value::String(s.trim().to_string()),
            (ScalarFunction::Length, [Value::String(s)]) => Value::from(s.chars().count() as i64),
            (ScalarFunction::Length, [Value::Array(items)]) => Value::from(items.len() as i64),
            (ScalarFunction::Abs, [Value::Number(n)]) => {
                if let Some(i) = n.as_i64() {
                    i.checked_abs().map(Value::from).unwrap_or(Value::Null)
                } else {
                    n.as_f64()
                        .and_then(|f| serde_json::Number::from_f64(f.abs()))
                        .map(Value::Number)
                        .unwrap_or(Value::Null)
                }
            }
            (ScalarFunction::Coalesce, _) => args.into_iter().find(|v| !v.is_null()).unwrap_or(Value::Null),
            (ScalarFunction::Array, _) => Value::Array(args),
            _ => Value::Null,
        }
    }
}

impl Display for ScalarFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
