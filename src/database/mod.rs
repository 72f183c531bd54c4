use tokio::sync::Mutex;

use crate::config::{DatabaseSettings, DATABASE_NAME_VAR, DATABASE_URL_VAR};

pub mod requests;
mod score;
mod sql;
mod store_error;

pub use score::{GameScore, HighscoreRecord, NewHighscore};
pub use sql::SqlStore;
pub use store_error::*;

pub type DatabasePool = sqlx::any::AnyPool;

pub const HIGHSCORE_TABLE: &str = "highscore";

/// Read and insert access to the `highscore` collection.
#[rocket::async_trait]
pub trait HighscoreStore: Send + Sync {
    /// The record with the highest score, earliest first among equals.
    async fn top_score(&self) -> StoreResult<Option<HighscoreRecord>>;

    /// Persists a new record and returns it with its assigned id.
    async fn insert(&self, entry: &NewHighscore) -> StoreResult<HighscoreRecord>;

    /// Names of at most `limit` collections visible in the database.
    async fn list_collections(&self, limit: usize) -> StoreResult<Vec<String>>;
}

pub enum StoreHandle {
    /// `DATABASE_URL` or `DATABASE_NAME` is missing.
    Unconfigured,
    /// Configured, but connecting failed at startup.
    Failed(StoreError),
    Connected(Box<dyn HighscoreStore>),
}

/// The process-wide persistence handle, built once at startup
/// and handed to the handlers as managed state.
pub struct Persistence {
    settings: DatabaseSettings,
    handle: StoreHandle,
    submit_lock: Mutex<()>,
}

impl Persistence {
    pub fn new(settings: DatabaseSettings, handle: StoreHandle) -> Self {
        Self {
            settings,
            handle,
            submit_lock: Mutex::new(()),
        }
    }

    /// Tries to connect with the given settings.
    /// Never fails: a missing value or a connection error leaves the store unavailable.
    pub async fn connect(settings: DatabaseSettings) -> Self {
        let (url, name) = match (settings.url.clone(), settings.name.clone()) {
            (Some(url), Some(name)) => (url, name),
            (None, _) => {
                log_unavailable(&StoreError::MissingConfig(DATABASE_URL_VAR));
                return Self::unavailable(settings);
            }
            (_, None) => {
                log_unavailable(&StoreError::MissingConfig(DATABASE_NAME_VAR));
                return Self::unavailable(settings);
            }
        };

        match SqlStore::connect(&url).await {
            Ok(store) => {
                tracing::info!("connected to database {}", name);
                Self::with_store(settings, store)
            }
            Err(error) => {
                log_unavailable(&error);
                Self::new(settings, StoreHandle::Failed(error))
            }
        }
    }

    /// A handle around an already constructed store.
    pub fn with_store(settings: DatabaseSettings, store: impl HighscoreStore + 'static) -> Self {
        Self::new(settings, StoreHandle::Connected(Box::new(store)))
    }

    pub fn unavailable(settings: DatabaseSettings) -> Self {
        Self::new(settings, StoreHandle::Unconfigured)
    }

    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    pub fn handle(&self) -> &StoreHandle {
        &self.handle
    }

    /// The store, if one is connected.
    pub fn store(&self) -> Option<&dyn HighscoreStore> {
        match &self.handle {
            StoreHandle::Connected(store) => Some(store.as_ref()),
            _ => None,
        }
    }

    pub(crate) fn submit_lock(&self) -> &Mutex<()> {
        &self.submit_lock
    }
}

fn log_unavailable(reason: &StoreError) {
    tracing::warn!("score store unavailable: {}", reason);
}
