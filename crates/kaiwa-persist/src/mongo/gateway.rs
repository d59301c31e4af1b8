use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use crate::error::{PersistError, Result};

/// Owns the MongoDB connection and hands out named collection handles.
///
/// The driver pools and reconnects lazily, so handles stay valid even when
/// the server was unreachable at startup; [`MongoGateway::ping`] is an
/// explicit probe whose failure the caller may choose to serve through
/// (degraded, reported by the health check).
pub struct MongoGateway {
    client: Client,
    database: mongodb::Database,
}

impl MongoGateway {
    /// Parse the connection URI and build a client with a bounded server
    /// selection timeout. No server contact happens here; use
    /// [`MongoGateway::ping`] to probe.
    pub async fn open(uri: &str, database: &str, timeout: Duration) -> Result<Self> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options)
            .map_err(|e| PersistError::Connection(e.to_string()))?;
        let database = client.database(database);

        Ok(Self { client, database })
    }

    /// Probe the connection with an admin ping, logging the outcome.
    /// Used at startup and re-run by the health check.
    ///
    /// Failures are reported to the caller, never retried here.
    pub async fn ping(&self) -> Result<()> {
        match self
            .client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
        {
            Ok(_) => {
                tracing::info!(database = %self.database.name(), "MongoDB connection established");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "MongoDB connection failed");
                Err(PersistError::Connection(e.to_string()))
            }
        }
    }

    /// Handle to a named collection in the configured database.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    /// Release pooled connections. The gateway is unusable afterwards.
    pub async fn close(&self) {
        self.client.clone().shutdown().await;
        tracing::info!("MongoDB connection closed");
    }
}
