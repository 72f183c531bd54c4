use rocket::serde::json::Json;
use rocket::{get, post, State};

use crate::leaderboard::{Leaderboard, Submission};

use super::*;

/// Returns the current top score, or the zero-record if there is none
/// or the store cannot be reached.
#[get("/api/highscore")]
pub async fn get_highscore(persistence: &State<Persistence>) -> Json<HighscoreRecord> {
    let leaderboard = match Leaderboard::new(persistence.inner()) {
        Some(leaderboard) => leaderboard,
        None => return Json(HighscoreRecord::zero()),
    };

    match leaderboard.top().await {
        Ok(top) => Json(top.unwrap_or_else(HighscoreRecord::zero)),
        Err(error) => {
            tracing::warn!("failed to fetch the top score: {}", error);
            Json(HighscoreRecord::zero())
        }
    }
}

/// Stores the submitted score if it beats the current top,
/// otherwise returns the current top unchanged.
/// Without a store the submission is echoed back with an empty id.
#[post("/api/highscore", data = "<entry>")]
pub async fn submit_score(
    entry: Json<NewHighscore>,
    persistence: &State<Persistence>,
) -> Json<HighscoreRecord> {
    let entry = entry.into_inner();

    let leaderboard = match Leaderboard::new(persistence.inner()) {
        Some(leaderboard) => leaderboard,
        None => return Json(HighscoreRecord::unsaved(entry)),
    };

    match leaderboard.submit(&entry).await {
        Ok(submission) => {
            if let Submission::Accepted(record) = &submission {
                tracing::info!("new highscore {} by {:?}", record.score, record.name);
            }
            Json(submission.into_record())
        }
        Err(error) => {
            tracing::warn!("failed to submit a score: {}", error);
            Json(HighscoreRecord::unsaved(entry))
        }
    }
}
