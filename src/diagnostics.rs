use std::fmt;

use rocket::serde::json::Json;
use rocket::serde::{Serialize, Serializer};
use rocket::{get, State};

use crate::database::{Persistence, StoreHandle};

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_LEN: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DatabaseStatus {
    NotAvailable,
    Uninitialized(String),
    Connected,
    ConnectedWithError(String),
}

impl fmt::Display for DatabaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAvailable => write!(f, "Not Available"),
            Self::Uninitialized(error) => write!(f, "Available but not initialized: {}", error),
            Self::Connected => write!(f, "Connected & Working"),
            Self::ConnectedWithError(error) => write!(f, "Connected but Error: {}", error),
        }
    }
}

impl Serialize for DatabaseStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(crate = "rocket::serde")]
pub enum Presence {
    Set,
    #[serde(rename = "Not Set")]
    NotSet,
}

impl From<bool> for Presence {
    fn from(is_set: bool) -> Self {
        if is_set {
            Self::Set
        } else {
            Self::NotSet
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(crate = "rocket::serde")]
pub enum ConnectionStatus {
    Connected,
    #[serde(rename = "Not Connected")]
    NotConnected,
}

/// Body of `GET /test`.
/// Reports only whether configuration values are present, never the values.
#[derive(Clone, Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DatabaseReport {
    pub backend: &'static str,
    pub database: DatabaseStatus,
    pub database_url: Presence,
    pub database_name: Presence,
    pub connection_status: ConnectionStatus,
    pub collections: Vec<String>,
}

impl DatabaseReport {
    /// Probes the store. Never fails; errors end up in the report.
    pub async fn collect(persistence: &Persistence) -> Self {
        let settings = persistence.settings();
        let mut report = Self {
            backend: "Running",
            database: DatabaseStatus::NotAvailable,
            database_url: settings.url_is_set().into(),
            database_name: settings.name_is_set().into(),
            connection_status: ConnectionStatus::NotConnected,
            collections: Vec::new(),
        };

        match persistence.handle() {
            StoreHandle::Unconfigured => {}
            StoreHandle::Failed(error) => {
                report.database = DatabaseStatus::Uninitialized(truncate(&error.to_string()));
            }
            StoreHandle::Connected(store) => {
                report.connection_status = ConnectionStatus::Connected;
                match store.list_collections(MAX_COLLECTIONS).await {
                    Ok(mut collections) => {
                        collections.truncate(MAX_COLLECTIONS);
                        report.collections = collections;
                        report.database = DatabaseStatus::Connected;
                    }
                    Err(error) => {
                        tracing::warn!("failed to list collections: {}", error);
                        report.database =
                            DatabaseStatus::ConnectedWithError(truncate(&error.to_string()));
                    }
                }
            }
        }

        report
    }
}

/// Cuts `message` down to its first 50 characters.
fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_LEN).collect()
}

#[get("/test")]
pub async fn test_database(persistence: &State<Persistence>) -> Json<DatabaseReport> {
    Json(DatabaseReport::collect(persistence.inner()).await)
}
