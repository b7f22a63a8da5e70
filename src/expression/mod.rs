pub mod literal;
pub use literal::*;

pub mod expression_error;
pub use expression_error::*;

pub mod scalar_function;
pub use scalar_function::*;

pub mod projection;
pub use projection::*;

pub mod eval;
pub use eval::*;
