//! MySQL-backed catalog
//!
//! One `MySqlConnection` per run. The driver is async, so the catalog owns a
//! current-thread tokio runtime and blocks on each call; nothing outside
//! this module sees a future.

use crate::config::DbConnectionConfig;
use crate::errors::{connection_error, query_error, runtime_error, Result};
use eavsearch_core::catalog::CatalogSource;
use eavsearch_core::query::{self, ParametrizedQuery};
use eavsearch_core::{
    log_op_end, log_op_error, log_op_start, AttributeDescriptor, ResultRow, Scope, SearchError,
    SearchRequest,
};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlRow};
use sqlx::{Connection, Row};
use tokio::runtime::Runtime;

pub struct MySqlCatalog {
    runtime: Runtime,
    conn: Option<MySqlConnection>,
}

impl MySqlCatalog {
    /// Open the connection described by `config`
    ///
    /// # Errors
    ///
    /// `SearchError::Connection` if the server cannot be reached or rejects
    /// the credentials. There is no retry.
    pub fn connect(config: &DbConnectionConfig) -> Result<Self> {
        log_op_start!("connect", host = config.host.as_str(), port = config.port);
        let start = std::time::Instant::now();

        println!("Connecting to DB...");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(runtime_error)?;

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(config.passwd.expose())
            .database(&config.db);

        let conn = runtime
            .block_on(MySqlConnection::connect_with(&options))
            .map_err(|e| {
                let err = connection_error(e);
                log_op_error!(
                    "connect",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                err
            })?;

        log_op_end!("connect", duration_ms = start.elapsed().as_millis() as u64);

        Ok(Self {
            runtime,
            conn: Some(conn),
        })
    }

    fn fetch(&mut self, op: &'static str, built: &ParametrizedQuery) -> Result<Vec<MySqlRow>> {
        log_op_start!(op, bind_count = built.binds.len());
        let start = std::time::Instant::now();

        let Self { runtime, conn } = self;
        let conn = conn.as_mut().ok_or_else(|| SearchError::Query {
            message: "connection already closed".to_string(),
        })?;

        let mut statement = sqlx::query(&built.sql);
        for bind in &built.binds {
            statement = statement.bind(bind.clone());
        }

        let rows = runtime
            .block_on(statement.fetch_all(&mut *conn))
            .map_err(|e| {
                let err = query_error(e);
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                err
            })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            row_count = rows.len()
        );
        Ok(rows)
    }
}

fn attribute_from_row(row: &MySqlRow) -> Result<Option<AttributeDescriptor>> {
    let id: Option<i64> = row.try_get("attribute_id").map_err(query_error)?;
    let Some(id) = id else {
        return Ok(None);
    };
    let code: Option<String> = row.try_get("attribute_code").map_err(query_error)?;
    let required: Option<i64> = row.try_get("required").map_err(query_error)?;
    Ok(Some(AttributeDescriptor {
        id,
        code: code.unwrap_or_default(),
        required: required.unwrap_or(0) != 0,
    }))
}

fn result_from_row(row: &MySqlRow) -> Result<ResultRow> {
    let attribute_id: Option<i64> = row.try_get("attribute_id").map_err(query_error)?;
    let required: Option<i64> = row.try_get("required").map_err(query_error)?;
    Ok(ResultRow {
        sku: row.try_get("sku").map_err(query_error)?,
        attribute_id: attribute_id.unwrap_or_default(),
        attribute_code: row.try_get("attribute_code").map_err(query_error)?,
        value: row.try_get("value").map_err(query_error)?,
        store_id: row.try_get("store_id").map_err(query_error)?,
        required: required.unwrap_or(0) != 0,
    })
}

impl CatalogSource for MySqlCatalog {
    fn list_attributes(&mut self, scope: Scope) -> Result<Vec<AttributeDescriptor>> {
        let built = query::build_attribute_list_query(scope);
        let rows = self.fetch("list_attributes", &built)?;

        // Attributes without an id come from unmatched outer joins.
        let attributes: Vec<_> = rows
            .iter()
            .map(attribute_from_row)
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();

        tracing::debug!(scope = scope.as_str(), count = attributes.len(), "listed attributes");
        Ok(attributes)
    }

    fn search(&mut self, request: &SearchRequest) -> Result<Vec<ResultRow>> {
        let built = query::build_search_query(request);
        let rows = self.fetch("search", &built)?;
        rows.iter().map(result_from_row).collect()
    }

    fn close(&mut self) -> Result<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        println!("Closing connection to DB...");
        self.runtime.block_on(conn.close()).map_err(connection_error)?;
        tracing::debug!("database connection closed");
        Ok(())
    }
}

impl Drop for MySqlCatalog {
    fn drop(&mut self) {
        if self.conn.is_some() {
            tracing::warn!("catalog dropped without close");
            if let Err(e) = self.close() {
                tracing::warn!(error = %e, "closing connection on drop failed");
            }
        }
    }
}
