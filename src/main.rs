use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::*;
use tracing_subscriber::EnvFilter;

mod catchers;
mod config;
mod cors;
mod database;
mod diagnostics;
mod leaderboard;

use config::Settings;
use database::{requests, Persistence};

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct Message {
    pub message: String,
}

impl Message {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_owned(),
        })
    }
}

#[launch]
async fn rocket() -> _ {
    init_logging();

    let settings = Settings::from_env();
    let persistence = Persistence::connect(settings.database.clone()).await;
    tracing::info!("binding to {}:{}", settings.host, settings.port);

    server(rocket::custom(settings.figment()), persistence)
}

/// Mounts every route, catcher and fairing on `base`.
pub fn server(base: Rocket<Build>, persistence: Persistence) -> Rocket<Build> {
    base
        .mount(
            "/",
            routes![
                index,
                hello,
                diagnostics::test_database,
                requests::get_highscore,
                requests::submit_score,
                cors::preflight,
            ],
        )
        .register("/", catchers![catchers::default_catcher])
        .attach(cors::Cors)
        .manage::<Persistence>(persistence)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Fails only if a global subscriber is already installed.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[get("/")]
fn index() -> Json<Message> {
    Message::new("Snake Game Backend Running")
}

#[get("/api/hello")]
fn hello() -> Json<Message> {
    Message::new("Hello from the backend API!")
}
