pub mod indexes;

use crate::config::DatabaseConfig;
use crate::utils::AppError;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

pub const USERS: &str = "users";
pub const COURSES: &str = "courses";
pub const ENROLLMENTS: &str = "enrollments";
pub const LESSONS: &str = "lessons";
pub const ASSIGNMENTS: &str = "assignments";
pub const SUBMISSIONS: &str = "submissions";

/// Every collection the platform declares. `lessons` is created but no
/// operation reads or writes it yet.
pub const COLLECTIONS: [&str; 6] = [USERS, COURSES, ENROLLMENTS, LESSONS, ASSIGNMENTS, SUBMISSIONS];

/// Shared MongoDB handle. Cloning is cheap; all clones share one pool.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Opens a pooled client and verifies liveness with `{ ping: 1 }`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        log::info!("🔌 Connecting to MongoDB at {} (db: {})", config.uri, config.database);

        let mongodb = Self::open(config).await?;
        mongodb
            .ping()
            .await
            .map_err(|e| AppError::ConnectionFailure(e.to_string()))?;

        log::info!("✅ Connected to MongoDB database: {}", config.database);
        Ok(mongodb)
    }

    /// Builds the pooled client without touching the server. The driver
    /// connects lazily on the first operation.
    pub(crate) async fn open(config: &DatabaseConfig) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| AppError::ConnectionFailure(format!("Invalid MongoDB URI: {}", e)))?;

        client_options.app_name = Some("eduhub-service".to_string());
        client_options.max_pool_size = Some(config.max_pool_size);
        client_options.min_pool_size = Some(config.min_pool_size);
        client_options.max_idle_time = Some(config.max_idle_time);
        client_options.connect_timeout = Some(config.connect_timeout);
        client_options.server_selection_timeout = Some(config.server_selection_timeout);

        let client = Client::with_options(client_options)
            .map_err(|e| AppError::ConnectionFailure(e.to_string()))?;
        let db = client.database(&config.database);

        Ok(Self { client, db })
    }

    /// Like [`MongoDB::connect`], but logs the failure and yields `None`.
    /// No retry is attempted.
    pub async fn try_connect(config: &DatabaseConfig) -> Option<Self> {
        match Self::connect(config).await {
            Ok(db) => Some(db),
            Err(e) => {
                log::error!("❌ Database connection failed: {}", e);
                None
            }
        }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Creates any declared collection that does not exist yet.
    pub async fn setup_collections(&self) -> Result<Vec<String>, AppError> {
        let existing = self.db.list_collection_names().await?;
        let mut created = Vec::new();

        for name in COLLECTIONS {
            if existing.iter().any(|c| c == name) {
                continue;
            }
            self.db.create_collection(name).await?;
            log::info!("   ✅ Collection created: {}", name);
            created.push(name.to_string());
        }

        log::info!("✅ Database setup completed ({} new collections)", created.len());
        Ok(created)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn documents(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }

    #[cfg(test)]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes the pool. Waits for outstanding cursors and sessions of this
    /// client to be dropped first.
    pub async fn shutdown(self) {
        log::info!("🔌 Closing MongoDB connection pool");
        self.client.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_declared_collections() {
        assert_eq!(COLLECTIONS.len(), 6);
        assert!(COLLECTIONS.contains(&"lessons"));
    }

    #[tokio::test]
    async fn test_unreachable_store_yields_none() {
        let config = DatabaseConfig {
            uri: "mongodb://127.0.0.1:1/".to_string(),
            server_selection_timeout: Duration::from_millis(200),
            connect_timeout: Duration::from_millis(200),
            ..DatabaseConfig::default()
        };
        assert!(MongoDB::try_connect(&config).await.is_none());
    }

    #[tokio::test]
    async fn test_open_does_not_contact_server() {
        let config = DatabaseConfig {
            uri: "mongodb://127.0.0.1:1/".to_string(),
            ..DatabaseConfig::default()
        };
        let db = MongoDB::open(&config).await.expect("open without a server");
        assert_eq!(db.database().name(), "eduhub_db");
    }

    #[tokio::test]
    async fn test_invalid_uri_is_connection_failure() {
        let config = DatabaseConfig {
            uri: "not-a-mongodb-uri".to_string(),
            ..DatabaseConfig::default()
        };
        match MongoDB::connect(&config).await {
            Err(AppError::ConnectionFailure(_)) => {}
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("connect should fail"),
        }
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let config = crate::config::AppConfig::from_env().database;

        let db = MongoDB::connect(&config).await.expect("connect");
        assert!(db.ping().await.is_ok());
        db.shutdown().await;
    }
}
