pub mod config;
pub use config::*;

pub mod naming;
pub use naming::*;

pub mod schema;
pub use schema::*;

pub mod catalog;
pub use catalog::*;

pub mod storage;
pub use storage::*;

pub mod db;
pub use db::*;
