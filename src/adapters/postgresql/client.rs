//! PostgreSQL batch executor
//!
//! Every batch gets its own connection. The connection's message stream is
//! driven on a separate task which collects the notices the server sends
//! while the batch runs; the task ends when the client is dropped and the
//! connection closes, so all notices are in hand before the outcome is built.

use crate::adapters::database::traits::{BatchExecutor, BatchOutcome};
use crate::config::{redact_connection_string, SecretString};
use crate::domain::{DatabaseError, Result, RunnerError, ScriptFailure, ServerMessage};
use async_trait::async_trait;
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_postgres::error::DbError;
use tokio_postgres::{AsyncMessage, Client, Connection};

/// Runs SQL batches against PostgreSQL
#[derive(Clone)]
pub struct PostgresExecutor {
    /// Original connection string, kept for redacted display
    connection_string: SecretString,

    /// Parsed driver configuration
    pg_config: tokio_postgres::Config,

    /// TLS connector; used when `sslmode` asks for it
    tls: MakeTlsConnector,
}

impl PostgresExecutor {
    /// Create a new executor
    ///
    /// No connection is opened here.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed or the TLS
    /// backend cannot be initialised.
    pub fn new(connection_string: SecretString) -> Result<Self> {
        let pg_config: tokio_postgres::Config = connection_string
            .expose_secret()
            .as_str()
            .parse()
            .map_err(|e| {
                RunnerError::Configuration(format!("Invalid PostgreSQL connection string: {}", e))
            })?;

        let connector = native_tls::TlsConnector::builder().build().map_err(|e| {
            RunnerError::Connection(format!("Failed to initialise TLS: {}", e))
        })?;

        Ok(Self {
            connection_string,
            pg_config,
            tls: MakeTlsConnector::new(connector),
        })
    }

    /// Get the connection string with the password masked
    pub fn connection_string_safe(&self) -> String {
        redact_connection_string(self.connection_string.expose_secret().as_str())
    }

    async fn connect(
        &self,
    ) -> std::result::Result<(Client, tokio::task::JoinHandle<Vec<ServerMessage>>), tokio_postgres::Error>
    {
        let (client, connection) = self.pg_config.connect(self.tls.clone()).await?;
        let driver = tokio::spawn(drive_connection(connection));
        Ok((client, driver))
    }
}

#[async_trait]
impl BatchExecutor for PostgresExecutor {
    async fn test_connection(&self) -> Result<()> {
        let (client, driver) = self.connect().await.map_err(|e| connection_error(&e))?;

        let result = client.simple_query("SELECT 1").await;
        drop(client);
        let _ = driver.await;

        result.map_err(|e| connection_error(&e))?;

        tracing::info!(target_db = %self.connection_string_safe(), "PostgreSQL connection test successful");
        Ok(())
    }

    async fn execute_batch(&self, sql: &str) -> BatchOutcome {
        let (client, driver) = match self.connect().await {
            Ok(pair) => pair,
            Err(e) => {
                return BatchOutcome::failed(Vec::new(), ScriptFailure::Connect(e.to_string()))
            }
        };

        let result = client.batch_execute(sql).await;

        // Closing the client lets the driver task drain and finish
        drop(client);
        let messages = match driver.await {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(error = %e, "Connection task ended abnormally, notices lost");
                Vec::new()
            }
        };

        match result {
            Ok(()) => BatchOutcome::succeeded(messages),
            Err(e) => BatchOutcome::failed(messages, ScriptFailure::Execution(database_error(&e))),
        }
    }

    fn describe(&self) -> String {
        self.connection_string_safe()
    }
}

/// Polls the connection until it closes, collecting server notices
async fn drive_connection<S, T>(mut connection: Connection<S, T>) -> Vec<ServerMessage>
where
    S: AsyncRead + AsyncWrite + Unpin,
    T: AsyncRead + AsyncWrite + Unpin,
{
    let mut notices = Vec::new();

    loop {
        match futures::future::poll_fn(|cx| connection.poll_message(cx)).await {
            Some(Ok(AsyncMessage::Notice(notice))) => {
                let message = server_message(&notice);
                tracing::debug!(message = %message, "Server notice");
                notices.push(message);
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                tracing::warn!(error = %e, "PostgreSQL connection error");
                break;
            }
            None => break,
        }
    }

    notices
}

fn server_message(notice: &DbError) -> ServerMessage {
    let mut message = ServerMessage::new(notice.severity(), notice.message())
        .with_code(notice.code().code());
    if let Some(detail) = notice.detail() {
        message = message.with_detail(detail);
    }
    if let Some(hint) = notice.hint() {
        message = message.with_hint(hint);
    }
    message
}

/// Error for a failed connection test
///
/// Rejections by the server (bad password, unknown database) keep their
/// SQLSTATE; network problems stay plain connection errors.
fn connection_error(err: &tokio_postgres::Error) -> RunnerError {
    match err.as_db_error() {
        Some(_) => RunnerError::Database(database_error(err)),
        None => RunnerError::Connection(err.to_string()),
    }
}

/// Converts a driver error, keeping the server's fields when there are any
fn database_error(err: &tokio_postgres::Error) -> DatabaseError {
    match err.as_db_error() {
        Some(db) => {
            let mut converted = DatabaseError {
                severity: db.severity().to_string(),
                code: Some(db.code().code().to_string()),
                message: db.message().to_string(),
                detail: None,
                hint: None,
            };
            if let Some(detail) = db.detail() {
                converted = converted.with_detail(detail);
            }
            if let Some(hint) = db.hint() {
                converted = converted.with_hint(hint);
            }
            converted
        }
        None => DatabaseError::new(err.to_string()),
    }
}
