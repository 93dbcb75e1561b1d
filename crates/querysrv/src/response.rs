use mysqlexec::value::JsonRow;
use serde::{Deserialize, Serialize};

/// Body of `POST /query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// The natural language question. Tolerates null or missing so the
    /// handler can reject with the envelope shape instead of a framework
    /// error.
    #[serde(default)]
    pub question: Option<String>,
}

/// The uniform response envelope.
///
/// All three fields are always present on the wire; exactly one of
/// `results` and `error` is non-null. `sql` accompanies errors whenever a
/// candidate statement existed at failure time.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub sql: Option<String>,
    pub results: Option<Vec<JsonRow>>,
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn success(sql: String, results: Vec<JsonRow>) -> QueryResponse {
        QueryResponse {
            sql: Some(sql),
            results: Some(results),
            error: None,
        }
    }

    pub fn failure(error: String, sql: Option<String>) -> QueryResponse {
        QueryResponse {
            sql,
            results: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
