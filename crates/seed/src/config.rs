//! Environment-driven configuration for the seeder.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use tracing::{debug, warn};
use users::AppError;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
pub const OUTPUT_VAR: &str = "SEED_OUTPUT";
pub const DOTENV_FILE: &str = ".env";

const POSTGRES_SCHEMES: [&str; 2] = ["postgres", "postgresql"];

/// How the report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(AppError::configuration(format!(
                "{OUTPUT_VAR} must be \"text\" or \"json\", got {other:?}"
            ))),
        }
    }
}

/// Configuration for a seed run.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// PostgreSQL connection string.
    pub database_url: String,

    /// Report format.
    pub output: OutputFormat,
}

impl SeedConfig {
    /// Reads the process environment, falling back to `.env` in the working directory.
    pub fn from_env() -> Result<Self, AppError> {
        let file_vars = read_dotenv(Path::new(DOTENV_FILE));
        Self::from_lookup(env_then_file(|key| std::env::var(key).ok(), &file_vars))
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::configuration(format!("{DATABASE_URL_VAR} is not set")))?;

        let output = match lookup(OUTPUT_VAR) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => OutputFormat::default(),
        };

        let config = Self {
            database_url,
            output,
        };
        config.connect_options()?;
        Ok(config)
    }

    /// Parses the connection string into driver options.
    pub fn connect_options(&self) -> Result<PgConnectOptions, AppError> {
        let invalid = |reason: String| {
            AppError::configuration(format!(
                "{DATABASE_URL_VAR} is not a valid PostgreSQL URL: {reason}"
            ))
        };

        let scheme = self
            .database_url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .ok_or_else(|| invalid("missing scheme".to_string()))?;
        if !POSTGRES_SCHEMES.contains(&scheme.as_str()) {
            return Err(invalid(format!("unsupported scheme {scheme:?}")));
        }

        PgConnectOptions::from_str(&self.database_url).map_err(|e| invalid(e.to_string()))
    }
}

/// Reads `KEY=value` pairs from a dotenv file.
///
/// A missing file yields no variables. Malformed lines are logged and skipped.
pub fn read_dotenv(path: &Path) -> HashMap<String, String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            debug!("No {} file found", path.display());
            return HashMap::new();
        }
        Err(e) => {
            warn!("Failed to read {}: {e}", path.display());
            return HashMap::new();
        }
    };

    let mut vars = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(e) => warn!("Skipping malformed line in {}: {e}", path.display()),
        }
    }
    debug!("Loaded {} variables from {}", vars.len(), path.display());
    vars
}

/// Looks a variable up in `env` first and in `file_vars` second.
pub fn env_then_file<'a, F>(
    env: F,
    file_vars: &'a HashMap<String, String>,
) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |key| env(key).or_else(|| file_vars.get(key).cloned())
}
