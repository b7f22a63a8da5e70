use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::ColumnType;

/// Catalog-facing description of one dataset column.
///
/// The same shape describes the backing column of a direct column reference
/// and the output of a computed expression, so schema derivation copies
/// fields from one `ColumnMetadata` into another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub ty: ColumnType,
    pub is_array: bool,
    /// Length of each array level, outermost first. Empty for scalars and
    /// for one-level arrays of unconstrained length.
    pub array_dimensions: Vec<usize>,
}

impl ColumnMetadata {
    pub fn new(name: &str, ty: ColumnType, is_array: bool, array_dimensions: Vec<usize>) -> Self {
        Self {
            name: name.to_string(),
            ty,
            is_array,
            array_dimensions,
        }
    }

    /// Convenience: a scalar column.
    pub fn scalar(name: &str, ty: ColumnType) -> Self {
        Self::new(name, ty, false, Vec::new())
    }

    /// Convenience: an array column with the given dimensions.
    pub fn array(name: &str, ty: ColumnType, array_dimensions: Vec<usize>) -> Self {
        Self::new(name, ty, true, array_dimensions)
    }

    /// Same element type, array-ness and dimensions; names may differ.
    pub fn same_shape(&self, other: &ColumnMetadata) -> bool {
        self.ty == other.ty && self.is_array == other.is_array && self.array_dimensions == other.array_dimensions
    }

    /// Check a stored value against this column.
    pub fn conforms(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        if !self.is_array {
            return self.ty.accepts(value);
        }
        if self.array_dimensions.is_empty() {
            return match value {
                Value::Array(items) => items.iter().all(|v| self.ty.accepts(v)),
                _ => false,
            };
        }
        Self::conforms_shape(self.ty, value, &self.array_dimensions)
    }

    fn conforms_shape(ty: ColumnType, value: &Value, dims: &[usize]) -> bool {
        match dims.split_first() {
            None => !value.is_array() && ty.accepts(value),
            Some((len, rest)) => match value {
                Value::Array(items) => items.len() == *len
                    && items.iter().all(|v| Self::conforms_shape(ty, v, rest)),
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_conforms() {
        let col = ColumnMetadata::scalar("age", ColumnType::Integer);
        assert!(col.conforms(&json!(30)));
        assert!(col.conforms(&json!(null)));
        assert!(!col.conforms(&json!("30")));
        assert!(!col.conforms(&json!([30])));
    }

    #[test]
    fn test_array_dimensions_are_checked_per_level() {
        let col = ColumnMetadata::array("m", ColumnType::Float, vec![2, 3]);
        assert!(col.conforms(&json!([[1.0, 2.0, 3.0], [4, 5, 6]])));
        assert!(!col.conforms(&json!([[1.0, 2.0], [4.0, 5.0]])));
        assert!(!col.conforms(&json!([1.0, 2.0])));
        assert!(!col.conforms(&json!([["a", "b", "c"], [1, 2, 3]])));
    }

    #[test]
    fn test_array_without_dimensions_takes_any_length() {
        let col = ColumnMetadata::array("tags", ColumnType::Text, vec![]);
        assert!(col.conforms(&json!([])));
        assert!(col.conforms(&json!(["a", "b", "c"])));
        assert!(!col.conforms(&json!("a")));
    }

    #[test]
    fn test_same_shape_ignores_name() {
        let col = ColumnMetadata::array("src", ColumnType::Integer, vec![4]);
        assert!(col.same_shape(&ColumnMetadata::array("dst", ColumnType::Integer, vec![4])));
        assert!(!col.same_shape(&ColumnMetadata::array("src", ColumnType::Integer, vec![3])));
        assert!(!col.same_shape(&ColumnMetadata::array("src", ColumnType::Float, vec![4])));
        assert!(!col.same_shape(&ColumnMetadata::scalar("src", ColumnType::Integer)));
    }
}
