//! Seeds the `users` table and prints what it holds.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed::prelude::*;
//!
//! let config = SeedConfig::from_env()?;
//! let db = Database::connect(&config.connect_options()?).await?;
//! let report = Seeder::new(db).run(&mut std::io::stdout(), config.output).await?;
//! ```

pub mod config;
pub mod report;
pub mod seeder;

use std::io::Write;

use tracing::{error, info};
use users::{AppError, Database};

use crate::config::SeedConfig;
use crate::seeder::{SeedReport, Seeder};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{OutputFormat, SeedConfig};
    pub use crate::report::{write_inserted, write_users};
    pub use crate::seeder::{DEFAULT_USERS, SeedReport, Seeder, default_users};
    pub use users::{AppError, Database, InMemoryUserStore, NewUser, User, UserStore};
}

/// Reads configuration from the environment, connects, and runs the seed flow.
///
/// The connection is closed before this returns, whether the flow succeeded
/// or not. Configuration and connection failures happen before a connection
/// exists, so there is nothing to close in those cases.
pub async fn run_from_env(out: &mut (impl Write + Send)) -> Result<SeedReport, AppError> {
    let config = SeedConfig::from_env()?;
    let options = config.connect_options()?;
    info!(
        host = options.get_host(),
        port = options.get_port(),
        database = options.get_database().unwrap_or("<default>"),
        "Connecting to database"
    );

    let db = Database::connect(&options).await?;
    Seeder::new(db).run(out, config.output).await
}

/// Exit status of a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status of a failed run.
pub const EXIT_FAILURE: u8 = 1;

/// Logs the outcome of a run and maps it to a process exit status.
///
/// This is the single place a failed run is reported.
pub fn exit_status(result: &Result<SeedReport, AppError>) -> u8 {
    match result {
        Ok(report) => {
            info!(
                inserted = report.inserted,
                total = report.users.len(),
                "Seed completed!"
            );
            EXIT_SUCCESS
        }
        Err(e) => {
            error!("Seed failed: {e}");
            EXIT_FAILURE
        }
    }
}
