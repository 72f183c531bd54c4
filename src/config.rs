use std::net::IpAddr;

use rocket::figment::Figment;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Connection settings for the score store.
/// Both values are optional: a missing one leaves the store unavailable.
#[derive(Clone, Debug, Default)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub name: Option<String>,
}

impl DatabaseSettings {
    pub fn url_is_set(&self) -> bool {
        self.url.is_some()
    }

    pub fn name_is_set(&self) -> bool {
        self.name.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    pub database: DatabaseSettings,
}

impl Settings {
    /// Reads the settings from the process environment (and a `.env` file, if present).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = match non_empty("HOST") {
            Some(host) => host.parse().unwrap_or_else(|_| {
                tracing::warn!("invalid HOST {:?}, binding to {}", host, DEFAULT_HOST);
                default_host()
            }),
            None => default_host(),
        };

        let port = match non_empty("PORT") {
            Some(port) => port.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("invalid PORT {:?}, using {}", port, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Self {
            host,
            port,
            database: DatabaseSettings {
                url: non_empty(DATABASE_URL_VAR),
                name: non_empty(DATABASE_NAME_VAR),
            },
        }
    }

    /// Rocket configuration with the bind address applied.
    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge(("address", self.host))
            .merge(("port", self.port))
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}
