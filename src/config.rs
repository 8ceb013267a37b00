use std::convert::Infallible;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;

use crate::password::{DEFAULT_HASH_COST, MAX_HASH_COST, MIN_HASH_COST};
use crate::server::StaticAssets;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5002;

/// Whether the server also ships the front-end bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Development => write!(f, "development"),
            RunMode::Production => write!(f, "production"),
        }
    }
}

/// Only `production` switches bundle serving on; any other value (`test`,
/// `staging`, ...) behaves like development.
impl FromStr for RunMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("production") {
            Ok(RunMode::Production)
        } else {
            Ok(RunMode::Development)
        }
    }
}

/// Where events and users are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    Mongo { url: String, name: Option<String> },
    InMemory,
}

/// Settings for `event-catalog serve`. Every flag can also come from the
/// environment (or a `.env` file).
#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// MongoDB connection string
    #[arg(
        long,
        env = "ATLAS_URI",
        hide_env_values = true,
        required_unless_present = "in_memory"
    )]
    pub database_url: Option<String>,

    /// Database name (defaults to the one in the connection string)
    #[arg(long, env = "DATABASE_NAME")]
    pub database_name: Option<String>,

    /// Keep everything in process memory instead of MongoDB
    #[arg(long, env = "CATALOG_IN_MEMORY")]
    pub in_memory: bool,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Run mode; `production` also serves the front-end bundle
    #[arg(long, env = "NODE_ENV", default_value_t = RunMode::Development)]
    pub mode: RunMode,

    /// Directory served under /uploads
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Front-end bundle served in production mode
    #[arg(long, env = "CLIENT_BUILD_DIR", default_value = "client/build")]
    pub client_dir: PathBuf,

    /// Argon2 time cost used for password hashing
    #[arg(
        long,
        env = "PASSWORD_HASH_COST",
        default_value_t = DEFAULT_HASH_COST,
        value_parser = clap::value_parser!(u32).range((MIN_HASH_COST as i64)..=(MAX_HASH_COST as i64))
    )]
    pub hash_cost: u32,
}

impl ServerConfig {
    pub fn database(&self) -> DatabaseConfig {
        match (&self.database_url, self.in_memory) {
            (Some(url), false) => DatabaseConfig::Mongo {
                url: url.clone(),
                name: self.database_name.clone(),
            },
            _ => DatabaseConfig::InMemory,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn client_bundle(&self) -> Option<&Path> {
        match self.mode {
            RunMode::Production => Some(self.client_dir.as_path()),
            RunMode::Development => None,
        }
    }

    pub fn static_assets(&self) -> StaticAssets {
        StaticAssets {
            uploads_dir: self.uploads_dir.clone(),
            client_dir: self.client_bundle().map(Path::to_path_buf),
        }
    }
}
