use crate::database::{HighscoreRecord, HighscoreStore, NewHighscore, Persistence, StoreResult};

/// What happened to a submitted score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The score beat the previous top and was stored.
    Accepted(HighscoreRecord),
    /// The score did not beat this record, nothing was stored.
    Kept(HighscoreRecord),
}

impl Submission {
    pub fn into_record(self) -> HighscoreRecord {
        match self {
            Self::Accepted(record) | Self::Kept(record) => record,
        }
    }
}

/// The highscore rules over a connected store.
pub struct Leaderboard<'a> {
    store: &'a dyn HighscoreStore,
    persistence: &'a Persistence,
}

impl<'a> Leaderboard<'a> {
    /// `None` when the store is unavailable.
    pub fn new(persistence: &'a Persistence) -> Option<Self> {
        persistence
            .store()
            .map(|store| Self { store, persistence })
    }

    pub async fn top(&self) -> StoreResult<Option<HighscoreRecord>> {
        self.store.top_score().await
    }

    /// Stores `entry` only if it strictly beats the current top,
    /// or if there is no top yet.
    pub async fn submit(&self, entry: &NewHighscore) -> StoreResult<Submission> {
        // Held across the read and the insert so two submits cannot both win.
        let _guard = self.persistence.submit_lock().lock().await;

        if let Some(top) = self.top().await? {
            if entry.score <= top.score {
                return Ok(Submission::Kept(top));
            }
        }

        let record = self.store.insert(entry).await?;
        Ok(Submission::Accepted(record))
    }
}
