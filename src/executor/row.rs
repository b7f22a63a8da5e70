use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One positional row; value `i` belongs to column `i` of whatever produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row(pub Vec<Value>);

impl Row {
    pub fn get(&self, index: usize) -> Option<&Value> { self.0.get(index) }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn values(&self) -> &[Value] { &self.0 }
}
