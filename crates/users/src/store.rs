//! Storage seam for the seed flow.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{NewUser, User};

/// Storage operations the seeder needs.
///
/// A store is an owned handle to one storage connection. [`UserStore::close`]
/// consumes the handle, so a store can be released at most once.
#[async_trait]
pub trait UserStore: Send + Sync + Sized {
    /// Inserts `users` as one atomic batch, skipping any row whose email
    /// already exists (in storage or earlier in the same batch).
    ///
    /// Returns the number of rows actually inserted.
    async fn create_many_skip_duplicates(&self, users: &[NewUser]) -> Result<u64, AppError>;

    /// Returns every stored user, ordered by id.
    async fn find_many(&self) -> Result<Vec<User>, AppError>;

    /// Releases the underlying connection.
    async fn close(self);
}
