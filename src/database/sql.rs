use std::str::FromStr;
use std::time::Duration;

use sqlx::any::{AnyKind, AnyPoolOptions, AnyRow};
use sqlx::Row;

use super::*;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Highscore store backed by any database sqlx can reach through the `Any` driver.
pub struct SqlStore {
    pool: DatabasePool,
    kind: AnyKind,
}

impl SqlStore {
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let mut options = AnyPoolOptions::new().connect_timeout(CONNECT_TIMEOUT);
        if is_sqlite_memory(url) {
            // Every connection to an in-memory sqlite url opens its own empty database.
            options = options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }
        Self::connect_with(options, url).await
    }

    /// Connects and makes sure the `highscore` table exists.
    pub async fn connect_with(options: AnyPoolOptions, url: &str) -> StoreResult<Self> {
        let kind = AnyKind::from_str(url)?;
        let pool = options.connect(url).await?;
        let store = Self { pool, kind };
        store.create_table().await?;
        Ok(store)
    }

    async fn create_table(&self) -> StoreResult<()> {
        let id_column = match self.kind {
            AnyKind::Postgres => "id BIGSERIAL PRIMARY KEY",
            AnyKind::MySql => "id BIGINT AUTO_INCREMENT PRIMARY KEY",
            _ => "id INTEGER PRIMARY KEY AUTOINCREMENT",
        };
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} ({}, name TEXT, score BIGINT NOT NULL)",
            HIGHSCORE_TABLE, id_column,
        ))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn record_from_row(row: &AnyRow) -> StoreResult<HighscoreRecord> {
        let id = row.try_get::<i64, usize>(0)?;
        let name = row.try_get::<Option<String>, usize>(1)?;
        let score = row.try_get::<GameScore, usize>(2)?;
        Ok(HighscoreRecord::new(id.to_string(), name, score))
    }
}

fn is_sqlite_memory(url: &str) -> bool {
    url.starts_with("sqlite:") && (url.contains(":memory:") || url.contains("mode=memory"))
}

#[rocket::async_trait]
impl HighscoreStore for SqlStore {
    async fn top_score(&self) -> StoreResult<Option<HighscoreRecord>> {
        let row = sqlx::query(&format!(
            "SELECT id, name, score FROM {} ORDER BY score DESC, id ASC LIMIT 1",
            HIGHSCORE_TABLE,
        ))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn insert(&self, entry: &NewHighscore) -> StoreResult<HighscoreRecord> {
        let id = match self.kind {
            AnyKind::Postgres => {
                let row = sqlx::query(&format!(
                    "INSERT INTO {} (name, score) VALUES ($1, $2) RETURNING id",
                    HIGHSCORE_TABLE,
                ))
                .bind(entry.name.clone())
                .bind(entry.score)
                .fetch_one(&self.pool)
                .await?;
                row.try_get::<i64, usize>(0)?
            }
            _ => {
                let response = sqlx::query(&format!(
                    "INSERT INTO {} (name, score) VALUES (?, ?)",
                    HIGHSCORE_TABLE,
                ))
                .bind(entry.name.clone())
                .bind(entry.score)
                .execute(&self.pool)
                .await?;
                response.last_insert_id().ok_or(StoreError::MissingId)?
            }
        };

        Ok(HighscoreRecord::new(
            id.to_string(),
            entry.name.clone(),
            entry.score,
        ))
    }

    async fn list_collections(&self, limit: usize) -> StoreResult<Vec<String>> {
        let query = match self.kind {
            AnyKind::Postgres => format!(
                "SELECT table_name::text FROM information_schema.tables \
                 WHERE table_schema = current_schema() ORDER BY 1 LIMIT {}",
                limit
            ),
            AnyKind::MySql => format!(
                "SELECT CAST(table_name AS CHAR) FROM information_schema.tables \
                 WHERE table_schema = DATABASE() ORDER BY 1 LIMIT {}",
                limit
            ),
            _ => format!(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name LIMIT {}",
                limit
            ),
        };

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| row.try_get::<String, usize>(0).map_err(StoreError::from))
            .collect()
    }
}
