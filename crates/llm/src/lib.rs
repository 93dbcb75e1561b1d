//! Minimal client for OpenAI-style chat completion APIs.

pub mod client;
pub mod errors;
