use std::env;
use std::fmt;
use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;

use crate::errors::MigrationError;

/// Source document used when neither the command line nor `SOURCE_FILE` names one.
pub const DEFAULT_SOURCE_FILE: &str = "example_hotel_data.json";

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_NAME: &str = "hotels";
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "secret";

/// How to reach the PostgreSQL server.
///
/// `DATABASE_URL` wins when set; otherwise the individual `DB_*` variables
/// are read, each with a local-development default.
#[derive(Clone, PartialEq, Eq)]
pub enum ConnectionSettings {
    Url(String),
    Parts {
        host: String,
        port: u16,
        database: String,
        user: String,
        password: String,
    },
}

impl ConnectionSettings {
    pub fn from_env() -> Result<Self, MigrationError> {
        if let Some(url) = non_empty_var("DATABASE_URL") {
            return Ok(ConnectionSettings::Url(url));
        }

        let port = match non_empty_var("DB_PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| MigrationError::Config(format!("DB_PORT is not a valid port: {raw:?}")))?,
            None => DEFAULT_DB_PORT,
        };

        Ok(ConnectionSettings::Parts {
            host: var_or("DB_HOST", DEFAULT_DB_HOST),
            port,
            database: var_or("DB_NAME", DEFAULT_DB_NAME),
            user: var_or("DB_USER", DEFAULT_DB_USER),
            password: var_or("DB_PASSWORD", DEFAULT_DB_PASSWORD),
        })
    }

    /// Builds the driver's connection descriptor. Nothing is dialed here.
    pub fn connect_options(&self) -> Result<PgConnectOptions, MigrationError> {
        match self {
            ConnectionSettings::Url(url) => Ok(url.parse::<PgConnectOptions>()?),
            ConnectionSettings::Parts {
                host,
                port,
                database,
                user,
                password,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .database(database)
                .username(user)
                .password(password)),
        }
    }
}

// Credentials stay out of logs.
impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionSettings::Url(_) => f.write_str("Url(<redacted>)"),
            ConnectionSettings::Parts {
                host,
                port,
                database,
                user,
                ..
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("database", database)
                .field("user", user)
                .finish_non_exhaustive(),
        }
    }
}

/// Everything a migration run needs from its environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub connection: ConnectionSettings,
    pub source_path: PathBuf,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Arguments
    ///
    /// * `args` - Command line arguments without the program name; the first one,
    ///   if any, is the source document path.
    pub fn from_env(args: impl IntoIterator<Item = String>) -> Result<Self, MigrationError> {
        let source_path = args
            .into_iter()
            .next()
            .or_else(|| non_empty_var("SOURCE_FILE"))
            .unwrap_or_else(|| DEFAULT_SOURCE_FILE.to_string());

        Ok(Self {
            connection: ConnectionSettings::from_env()?,
            source_path: PathBuf::from(source_path),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_string())
}
