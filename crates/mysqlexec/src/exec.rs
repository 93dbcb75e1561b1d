use async_trait::async_trait;
use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Opts, Row as MysqlRow};
use tracing::debug;

use crate::config::StoreConfig;
use crate::errors::Result;
use crate::value::{read_cell, Row};

/// Capability seam for statement execution.
///
/// The production implementation talks to MySQL; tests substitute
/// deterministic fakes to drive the request pipeline without a server.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute `sql` verbatim and eagerly materialize every result row.
    async fn execute_query(&self, sql: &str) -> Result<Vec<Row>>;
}

/// Executes statements against MySQL/MariaDB.
///
/// A fresh connection is opened per call and closed before returning.
/// Nothing is pooled or cached across calls; the underlying driver's
/// defaults govern socket behavior.
#[derive(Debug)]
pub struct MysqlExecutor {
    opts: Opts,
}

impl MysqlExecutor {
    pub fn new(config: &StoreConfig) -> Result<MysqlExecutor> {
        let opts = Opts::from_url(&config.connection_string())?;
        Ok(MysqlExecutor { opts })
    }

    async fn run_query(conn: &mut Conn, sql: &str) -> Result<Vec<Row>> {
        let result = conn.exec_iter(sql, ()).await?;
        let columns = result.columns();
        let mysql_rows: Vec<MysqlRow> = result.collect_and_drop().await?;

        // No result set means no rows to materialize.
        let columns = match columns {
            Some(columns) => columns,
            None => return Ok(Vec::new()),
        };

        let mut rows = Vec::with_capacity(mysql_rows.len());
        for mysql_row in &mysql_rows {
            let mut row = Row::with_capacity(columns.len());
            for (idx, col) in columns.iter().enumerate() {
                row.insert(col.name_str().into_owned(), read_cell(mysql_row, col, idx)?);
            }
            rows.push(row);
        }

        debug!(rows = rows.len(), "materialized result rows");
        Ok(rows)
    }
}

#[async_trait]
impl QueryExecutor for MysqlExecutor {
    async fn execute_query(&self, sql: &str) -> Result<Vec<Row>> {
        let mut conn = Conn::new(self.opts.clone()).await?;
        debug!(%sql, "executing statement");

        // Close the connection before surfacing any query error.
        let result = Self::run_query(&mut conn, sql).await;
        let closed = conn.disconnect().await;

        let rows = result?;
        closed?;
        Ok(rows)
    }
}
