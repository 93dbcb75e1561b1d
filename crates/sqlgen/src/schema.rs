use std::fs;
use std::path::Path;

use crate::errors::{Result, SqlGenError};

/// Immutable schema description text used to ground translation.
///
/// Loaded once at process start; never refreshed. Schema drift requires a
/// restart.
#[derive(Debug, Clone)]
pub struct SchemaDescription {
    text: String,
}

impl SchemaDescription {
    /// Read the schema description from a file.
    ///
    /// A missing or unreadable file is a startup-fatal condition for the
    /// service, the caller is expected to abort on error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<SchemaDescription> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SqlGenError::SchemaFile {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(SchemaDescription { text })
    }

    pub fn new(text: impl Into<String>) -> SchemaDescription {
        SchemaDescription { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
