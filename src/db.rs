use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::event::cmap::{CmapEvent, ConnectionClosedReason};
use mongodb::event::sdam::SdamEvent;
use mongodb::event::EventHandler;
use mongodb::options::{ClientOptions, Credential};
use mongodb::Client;

use crate::config::Config;

/// Process-wide MongoDB handle
///
/// Created once in `main`, cloned into the store, and closed explicitly after
/// the HTTP server stops. `mongodb::Client` pools connections internally, so
/// clones are cheap and share the same pool.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db: mongodb::Database,
}

impl Database {
    /// Connect to MongoDB using the configured host, port, and credentials
    ///
    /// The connection is verified with a `ping` before returning, so a
    /// misconfigured or unreachable server fails startup instead of the first
    /// request.
    pub async fn connect(config: &Config) -> Result<Self> {
        let uri = config.mongo_uri();
        tracing::info!("Database connecting to {} ...", uri);

        let mut options = ClientOptions::parse(uri.as_str())
            .await
            .context("Failed to parse MongoDB connection string")?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.default_database = Some(config.db_name.clone());
        attach_event_logging(&mut options);

        if let Some(user) = &config.db_user {
            options.credential = Some(
                Credential::builder()
                    .username(user.clone())
                    .password(config.db_pass.clone())
                    .build(),
            );
        }

        let client = Client::with_options(options)
            .context("Failed to create MongoDB client")?;
        let db = client.database(&config.db_name);

        let database = Self { client, db };
        if let Err(e) = database.ping().await {
            tracing::error!("Database connection error: {:#}", e);
            return Err(e);
        }

        tracing::info!("Database connected: {}", config.db_name);
        Ok(database)
    }

    /// Get a reference to the underlying database
    pub fn db(&self) -> &mongodb::Database {
        &self.db
    }

    /// Round-trip a `ping` command to the server
    pub async fn ping(&self) -> Result<()> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to ping MongoDB")?;
        Ok(())
    }

    /// Close the connection pool, waiting for in-flight operations to finish
    pub async fn close(self) {
        tracing::info!("Database connection closing ...");
        self.client.shutdown().await;
        tracing::info!("Database closed");
    }
}

/// Log server failures and closes for the lifetime of the client, not just
/// the startup ping
fn attach_event_logging(options: &mut ClientOptions) {
    options.sdam_event_handler = Some(EventHandler::callback(log_sdam_event));
    options.cmap_event_handler = Some(EventHandler::callback(log_cmap_event));
}

fn log_sdam_event(event: SdamEvent) {
    match event {
        SdamEvent::ServerHeartbeatFailed(e) => {
            tracing::error!(
                "Database connection error: {} unreachable: {}",
                e.server_address,
                e.failure
            );
        }
        SdamEvent::ServerClosed(e) => {
            tracing::info!("Database server closed: {}", e.address);
        }
        SdamEvent::TopologyClosed(_) => {
            tracing::info!("Database topology closed");
        }
        _ => {}
    }
}

fn log_cmap_event(event: CmapEvent) {
    if let CmapEvent::ConnectionClosed(e) = event {
        if closed_by_failure(&e.reason) {
            tracing::error!(
                "Database connection {} to {} closed: {:?}",
                e.connection_id,
                e.address,
                e.reason
            );
        } else {
            tracing::debug!(
                "Database connection {} to {} closed: {:?}",
                e.connection_id,
                e.address,
                e.reason
            );
        }
    }
}

/// Idle, stale and pool-shutdown closes are routine pool maintenance
fn closed_by_failure(reason: &ConnectionClosedReason) -> bool {
    matches!(
        reason,
        ConnectionClosedReason::Error | ConnectionClosedReason::Dropped
    )
}
