//! Natural language to SQL translation: schema grounding, prompt
//! construction, candidate extraction, and the read-only safety gate.

pub mod errors;
pub mod gate;
pub mod prompt;
pub mod schema;
pub mod translate;
