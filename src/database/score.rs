use rocket::serde::{Deserialize, Serialize};

pub type GameScore = i64;

/// A stored highscore as it goes over the wire.
/// `id` is empty when the record was never persisted.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct HighscoreRecord {
    pub id: String,
    pub name: Option<String>,
    pub score: GameScore,
}

impl HighscoreRecord {
    pub fn new(id: impl Into<String>, name: Option<String>, score: GameScore) -> Self {
        Self {
            id: id.into(),
            name,
            score,
        }
    }

    /// The zero-record returned when there is nothing to report.
    pub fn zero() -> Self {
        Self::new(String::new(), None, 0)
    }

    /// Echo of a submission that could not be stored.
    pub fn unsaved(entry: NewHighscore) -> Self {
        Self::new(String::new(), entry.name, entry.score)
    }
}

/// Submission payload for `POST /api/highscore`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct NewHighscore {
    #[serde(default)]
    pub name: Option<String>,
    pub score: GameScore,
}

impl NewHighscore {
    pub fn new(name: Option<String>, score: GameScore) -> Self {
        Self { name, score }
    }
}
