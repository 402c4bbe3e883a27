// region:    --- Imports
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::info;

// endregion: --- Imports

// region:    --- Config

/// Process configuration, loaded once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Config {
    pub fn load() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            bind_addr: load_or("BIND_ADDR", "0.0.0.0:3000"),
            max_connections: load_or("DB_MAX_CONNECTIONS", "5"),
        }
    }
}

fn load_or<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{:<12} --> {} not set, using default: {}", "Config", key, default);
        default.to_string()
    });
    match raw.parse() {
        Ok(value) => value,
        Err(e) => panic!("invalid {key} value {raw:?}: {e}"),
    }
}

// endregion: --- Config
