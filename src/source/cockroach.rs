//! Live CockroachDB source.
//!
//! Reads open transactions from `crdb_internal.cluster_transactions`, joined
//! with the statement currently running in each of them
//! (`crdb_internal.cluster_queries`) and the time spent waiting on locks
//! (`crdb_internal.cluster_locks`, skipped on tenants).
//!
//! Connects over the PostgreSQL wire protocol using the standard
//! environment variables, with CockroachDB defaults:
//! - PGHOST (default: localhost)
//! - PGPORT (default: 26257)
//! - PGUSER (default: root)
//! - PGPASSWORD (default: empty)
//! - PGDATABASE (default: defaultdb)

use native_tls::TlsConnector;
use postgres::{Client, NoTls, Row};
use postgres_native_tls::MakeTlsConnector;
use tracing::{debug, info};

use super::{SourceError, TransactionSource};
use crate::model::{ExecutionStatus, RecentTransaction};

const DEFAULT_PORT: &str = "26257";
const DEFAULT_USER: &str = "root";
const DEFAULT_DATABASE: &str = "defaultdb";

const TRANSACTION_COLUMNS: &str = r#"
    SELECT
        t.id::STRING AS execution_id,
        COALESCE(t.session_id, '') AS session_id,
        COALESCE(EXTRACT(EPOCH FROM t.start)::INT8, 0) AS start,
        COALESCE(EXTRACT(EPOCH FROM (now() - t.start))::FLOAT8, 0) AS elapsed_secs,
        COALESCE(t.application_name, '') AS application_name,
        COALESCE(q.query, '') AS query,
        q.query_id::STRING AS statement_id,
        q.phase AS phase,
        COALESCE(t.num_stmts, 0)::INT8 AS num_stmts,
        (COALESCE(t.num_retries, 0) + COALESCE(t.num_auto_retries, 0))::INT8 AS retries,"#;

/// Longest ungranted lock wait of the transaction.
const LOCK_WAIT_COLUMN: &str = r#"
        (
            SELECT EXTRACT(EPOCH FROM max(l.duration))::FLOAT8
            FROM crdb_internal.cluster_locks l
            WHERE l.txn_id = t.id AND NOT l.granted
        ) AS waiting_secs"#;

/// Tenants cannot read `cluster_locks`.
const NO_LOCK_WAIT_COLUMN: &str = r#"
        NULL::FLOAT8 AS waiting_secs"#;

const TRANSACTION_SOURCE: &str = r#"
    FROM crdb_internal.cluster_transactions t
    LEFT JOIN crdb_internal.cluster_queries q ON q.txn_id = t.id
    ORDER BY t.start
"#;

fn recent_transactions_query(is_tenant: bool) -> String {
    let waiting = if is_tenant {
        NO_LOCK_WAIT_COLUMN
    } else {
        LOCK_WAIT_COLUMN
    };
    format!("{}{}{}", TRANSACTION_COLUMNS, waiting, TRANSACTION_SOURCE)
}

/// How to secure the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Plain TCP, for `--insecure` clusters.
    Disable,
    /// TLS with certificate verification.
    #[default]
    Verify,
    /// TLS accepting self-signed certificates.
    AcceptInvalidCerts,
}

/// Live source backed by a CockroachDB connection.
pub struct CockroachSource {
    connection_string: String,
    tls: TlsMode,
    is_tenant: bool,
    client: Option<Client>,
}

impl CockroachSource {
    /// Creates a source from environment variables.
    pub fn from_env(tls: TlsMode) -> Self {
        let host = std::env::var("PGHOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("PGPORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let user = std::env::var("PGUSER").unwrap_or_else(|_| DEFAULT_USER.to_string());
        let password = std::env::var("PGPASSWORD").unwrap_or_default();
        let database =
            std::env::var("PGDATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        Self::with_connection_string(
            build_connection_string(&host, &port, &user, &password, &database),
            tls,
        )
    }

    /// Creates a source with an explicit connection string (key=value or URL).
    pub fn with_connection_string(connection_string: String, tls: TlsMode) -> Self {
        Self {
            connection_string,
            tls,
            is_tenant: false,
            client: None,
        }
    }

    /// Marks the cluster as a tenant, which has no lock contention data.
    pub fn with_tenant(mut self, is_tenant: bool) -> Self {
        self.is_tenant = is_tenant;
        self
    }

    /// Attempts to connect. Useful for startup checks before launching the TUI.
    pub fn try_connect(&mut self) -> Result<(), SourceError> {
        self.ensure_connected().map(|_| ())
    }

    fn ensure_connected(&mut self) -> Result<&mut Client, SourceError> {
        if self.client.is_none() {
            let client = match self.tls {
                TlsMode::Disable => Client::connect(&self.connection_string, NoTls),
                TlsMode::Verify | TlsMode::AcceptInvalidCerts => {
                    let connector = TlsConnector::builder()
                        .danger_accept_invalid_certs(self.tls == TlsMode::AcceptInvalidCerts)
                        .build()
                        .map_err(|e| SourceError::Connection(e.to_string()))?;
                    Client::connect(&self.connection_string, MakeTlsConnector::new(connector))
                }
            };

            match client {
                Ok(client) => {
                    info!("connected to cluster ({:?} TLS)", self.tls);
                    self.client = Some(client);
                }
                Err(e) => {
                    return Err(SourceError::Connection(format_postgres_error(&e)));
                }
            }
        }

        self.client
            .as_mut()
            .ok_or_else(|| SourceError::Connection("not connected".to_string()))
    }
}

impl TransactionSource for CockroachSource {
    fn fetch(&mut self) -> Result<Vec<RecentTransaction>, SourceError> {
        let query = recent_transactions_query(self.is_tenant);
        let client = self.ensure_connected()?;
        let rows = match client.query(query.as_str(), &[]) {
            Ok(rows) => rows,
            Err(e) => {
                let msg = format_postgres_error(&e);
                // A closed connection is re-established on the next fetch.
                if e.is_closed() {
                    self.client = None;
                }
                return Err(SourceError::Query(msg));
            }
        };

        let transactions = rows
            .iter()
            .map(transaction_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        debug!(count = transactions.len(), "fetched cluster transactions");
        Ok(transactions)
    }

    fn describe(&self) -> String {
        "cluster".to_string()
    }
}

fn transaction_from_row(row: &Row) -> Result<RecentTransaction, postgres::Error> {
    let phase: Option<String> = row.try_get("phase")?;
    let waiting_secs: Option<f64> = row.try_get("waiting_secs")?;
    let num_stmts: i64 = row.try_get("num_stmts")?;
    let retries: i64 = row.try_get("retries")?;

    Ok(RecentTransaction {
        execution_id: row.try_get("execution_id")?,
        session_id: row.try_get("session_id")?,
        start: row.try_get("start")?,
        elapsed_secs: row.try_get("elapsed_secs")?,
        application: row.try_get("application_name")?,
        query: row.try_get("query")?,
        statement_id: row.try_get("statement_id")?,
        status: resolve_status(phase.as_deref(), waiting_secs),
        statement_count: num_stmts.max(0) as u64,
        retries: retries.max(0) as u64,
        time_spent_waiting_secs: waiting_secs,
    })
}

/// A transaction blocked on a lock is waiting whatever its statement phase.
fn resolve_status(phase: Option<&str>, waiting_secs: Option<f64>) -> ExecutionStatus {
    if waiting_secs.is_some() {
        ExecutionStatus::Waiting
    } else {
        ExecutionStatus::from_phase(phase)
    }
}

/// Builds a libpq key=value connection string.
fn build_connection_string(
    host: &str,
    port: &str,
    user: &str,
    password: &str,
    database: &str,
) -> String {
    if password.is_empty() {
        format!(
            "host={} port={} user={} dbname={}",
            host, port, user, database
        )
    } else {
        format!(
            "host={} port={} user={} password={} dbname={}",
            host, port, user, password, database
        )
    }
}

/// Formats a driver error for display.
fn format_postgres_error(e: &postgres::Error) -> String {
    if let Some(db_error) = e.as_db_error() {
        format!("{}: {}", db_error.severity(), db_error.message())
    } else {
        let msg = e.to_string();
        if msg.contains("Connection refused") {
            "connection refused".to_string()
        } else if msg.contains("password authentication failed") {
            "password authentication failed".to_string()
        } else {
            msg
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_string_without_password() {
        assert_eq!(
            build_connection_string("db1", "26257", "root", "", "defaultdb"),
            "host=db1 port=26257 user=root dbname=defaultdb"
        );
    }

    #[test]
    fn connection_string_with_password() {
        assert_eq!(
            build_connection_string("db1", "26000", "app", "s3cret", "bank"),
            "host=db1 port=26000 user=app password=s3cret dbname=bank"
        );
    }

    #[test]
    fn lock_wait_overrides_phase() {
        assert_eq!(
            resolve_status(Some("executing"), Some(1.5)),
            ExecutionStatus::Waiting
        );
        assert_eq!(resolve_status(Some("preparing"), None), ExecutionStatus::Preparing);
        assert_eq!(resolve_status(None, None), ExecutionStatus::Idle);
    }

    #[test]
    fn new_source_is_disconnected() {
        let source =
            CockroachSource::with_connection_string("host=localhost".to_string(), TlsMode::Disable);
        assert!(source.client.is_none());
        assert!(!source.is_tenant);
        assert_eq!(source.describe(), "cluster");
    }

    #[test]
    fn tenant_query_skips_lock_table() {
        let full = recent_transactions_query(false);
        assert!(full.contains("crdb_internal.cluster_locks"));
        assert!(full.contains("AS waiting_secs"));

        let tenant = recent_transactions_query(true);
        assert!(!tenant.contains("cluster_locks"));
        assert!(tenant.contains("NULL::FLOAT8 AS waiting_secs"));
        assert!(tenant.contains("FROM crdb_internal.cluster_transactions t"));

        let source =
            CockroachSource::with_connection_string("host=localhost".to_string(), TlsMode::Disable)
                .with_tenant(true);
        assert!(source.is_tenant);
    }
}
