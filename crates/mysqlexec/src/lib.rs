//! MySQL statement execution and row materialization.

pub mod config;
pub mod errors;
pub mod exec;
pub mod value;
