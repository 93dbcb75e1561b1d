//! HTTP service turning natural language questions into gated SELECT
//! statements and their results.

pub mod args;
pub mod errors;
pub mod handlers;
pub mod response;
pub mod server;
