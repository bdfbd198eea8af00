//! The seed flow: batch insert, report, fetch, report, release.

use std::io::Write;

use tracing::info;
use users::{AppError, NewUser, User, UserStore};

use crate::config::OutputFormat;
use crate::report::{write_inserted, write_users};

/// Users inserted by every run, as `(name, email)`.
pub const DEFAULT_USERS: [(&str, &str); 4] = [
    ("Path", "path@example.com"),
    ("John", "john@example.com"),
    ("Alice", "alice@example.com"),
    ("Bob", "bob@example.com"),
];

/// Returns [`DEFAULT_USERS`] as insertable rows, in order.
pub fn default_users() -> Vec<NewUser> {
    DEFAULT_USERS
        .iter()
        .map(|(name, email)| NewUser::new(*name, *email))
        .collect()
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Rows created by this run's batch insert.
    pub inserted: u64,
    /// Every row in the table after the insert.
    pub users: Vec<User>,
}

/// Seeds a user store and reports its contents.
///
/// The seeder owns the store for its whole lifetime; [`Seeder::run`]
/// consumes it and closes the store on every exit path.
pub struct Seeder<S: UserStore> {
    store: S,
    users: Vec<NewUser>,
}

impl<S: UserStore> Seeder<S> {
    /// Creates a seeder that inserts [`DEFAULT_USERS`].
    pub fn new(store: S) -> Self {
        Self {
            store,
            users: default_users(),
        }
    }

    /// Replaces the batch to insert.
    pub fn with_users(mut self, users: Vec<NewUser>) -> Self {
        self.users = users;
        self
    }

    /// Runs the flow, then closes the store whether or not the flow succeeded.
    pub async fn run(
        self,
        out: &mut (impl Write + Send),
        format: OutputFormat,
    ) -> Result<SeedReport, AppError> {
        let Self { store, users } = self;

        let outcome = seed_and_list(&store, &users, out, format).await;
        store.close().await;

        outcome
    }
}

async fn seed_and_list<S: UserStore>(
    store: &S,
    users: &[NewUser],
    out: &mut (impl Write + Send),
    format: OutputFormat,
) -> Result<SeedReport, AppError> {
    info!("Seeding {} users...", users.len());
    let inserted = store.create_many_skip_duplicates(users).await?;
    info!(
        "Inserted {} users ({} skipped as duplicates)",
        inserted,
        (users.len() as u64).saturating_sub(inserted)
    );
    write_inserted(out, format, inserted)?;

    let all = store.find_many().await?;
    info!("Fetched {} users", all.len());
    write_users(out, format, &all)?;

    Ok(SeedReport {
        inserted,
        users: all,
    })
}
