use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mysqlexec::value::{normalize_rows, JsonRow};
use tracing::{debug, error, info};

use crate::errors::{Result, SrvError};
use crate::response::{HealthResponse, QueryRequest, QueryResponse};
use crate::server::ServerState;

/// Liveness probe. Never touches the model or the store.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /query`: run one question through the pipeline and envelope the
/// outcome.
///
/// The body extractor is optional so malformed or missing JSON degrades to
/// the empty-question rejection instead of a framework-shaped error.
pub async fn query(
    State(state): State<Arc<ServerState>>,
    body: Option<Json<QueryRequest>>,
) -> (StatusCode, Json<QueryResponse>) {
    let question = body.and_then(|Json(req)| req.question).unwrap_or_default();
    debug!(question_len = question.len(), "received query request");

    match run_pipeline(&state, &question).await {
        Ok((sql, results)) => {
            info!(%sql, rows = results.len(), "query succeeded");
            (StatusCode::OK, Json(QueryResponse::success(sql, results)))
        }
        Err(e) => {
            error!(%e, "query failed");
            let (status, envelope) = e.into_response_parts();
            (status, Json(envelope))
        }
    }
}

/// Linear pipeline with early exit on the first failing stage:
/// validate, translate, gate, execute, normalize.
async fn run_pipeline(state: &ServerState, question: &str) -> Result<(String, Vec<JsonRow>)> {
    if question.is_empty() {
        return Err(SrvError::EmptyQuestion);
    }

    let sql = state.translator.translate(question).await?;

    if !sqlgen::gate::is_select(&sql) {
        return Err(SrvError::DisallowedQuery { sql });
    }

    let rows = state
        .executor
        .execute_query(&sql)
        .await
        .map_err(|source| SrvError::Store {
            sql: sql.clone(),
            source,
        })?;

    Ok((sql, normalize_rows(rows)))
}
