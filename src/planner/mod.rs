pub mod plan_node;
pub use plan_node::*;
