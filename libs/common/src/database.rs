//! Database module for handling MongoDB connections
//!
//! This module provides client construction, configuration, and health
//! checks for the MongoDB document store.

use crate::error::{StoreError, StoreResult};
use mongodb::{Client, Database, bson::doc};

/// Document-store configuration struct
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    /// Database holding the application collections
    pub db_name: String,
    /// Database to authenticate against, empty when the store runs open
    pub auth_db: String,
    pub username: String,
    pub password: String,
}

impl MongoConfig {
    /// Build the connection URI, with or without credentials
    fn uri(&self) -> String {
        if self.username.is_empty() {
            format!("mongodb://{}:{}", self.host, self.port)
        } else {
            format!(
                "mongodb://{}:{}@{}:{}/?authSource={}",
                self.username, self.password, self.host, self.port, self.auth_db
            )
        }
    }
}

/// Connect to MongoDB and return a handle on the configured database
pub async fn init_database(config: &MongoConfig) -> StoreResult<Database> {
    if config.host.is_empty() {
        return Err(StoreError::Configuration(
            "document store host is not set".to_string(),
        ));
    }

    let client = Client::with_uri_str(config.uri())
        .await
        .map_err(StoreError::Connection)?;

    Ok(client.database(&config.db_name))
}

/// Check document-store connectivity with a ping
pub async fn health_check(database: &Database) -> StoreResult<bool> {
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(StoreError::Query)?;

    Ok(true)
}
