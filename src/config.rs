//! Server configuration read from environment variables.

use std::path::PathBuf;

/// Web server configuration. Every field has a default; see [`ServerConfig::from_env`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding one JSON snapshot per tournament.
    pub state_dir: PathBuf,
    /// Roster used when a create request carries no player list.
    pub roster_csv: Option<PathBuf>,
    /// CSV column holding the player name.
    pub roster_name_column: usize,
    /// Served under `/static` for the presentation layer.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            state_dir: PathBuf::from("tournament_state"),
            roster_csv: None,
            roster_name_column: 2,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `STATE_DIR`, `ROSTER_CSV`, `ROSTER_NAME_COLUMN` and `STATIC_DIR`.
    /// Unparseable numbers fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port),
            state_dir: get("STATE_DIR").map_or(defaults.state_dir, PathBuf::from),
            roster_csv: get("ROSTER_CSV").map(PathBuf::from),
            roster_name_column: parse_or(
                "ROSTER_NAME_COLUMN",
                get("ROSTER_NAME_COLUMN"),
                defaults.roster_name_column,
            ),
            static_dir: get("STATIC_DIR").map_or(defaults.static_dir, PathBuf::from),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match raw {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
