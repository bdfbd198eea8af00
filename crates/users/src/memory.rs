//! In-memory user store.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{NewUser, User};
use crate::store::UserStore;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<User>,
    next_id: i32,
}

/// User store kept in process memory.
///
/// Clones share the same table, so each clone behaves like a separate
/// connection to one database. Ids are assigned sequentially from 1, and
/// emails are unique just like the `users` table's constraint.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    table: Arc<Mutex<Table>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_many_skip_duplicates(&self, users: &[NewUser]) -> Result<u64, AppError> {
        let mut table = self.table.lock().await;
        let mut seen: HashSet<String> = table.rows.iter().map(|u| u.email.clone()).collect();

        let mut inserted = 0u64;
        for user in users {
            if !seen.insert(user.email.clone()) {
                debug!(email = %user.email, "Skipping duplicate email");
                continue;
            }

            table.next_id += 1;
            let id = table.next_id;
            table.rows.push(User {
                id,
                name: user.name.clone(),
                email: user.email.clone(),
            });
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn find_many(&self) -> Result<Vec<User>, AppError> {
        let table = self.table.lock().await;
        let mut rows = table.rows.clone();
        rows.sort_by_key(|u| u.id);
        Ok(rows)
    }

    async fn close(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<NewUser> {
        vec![
            NewUser::new("Path", "path@example.com"),
            NewUser::new("John", "john@example.com"),
        ]
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = InMemoryUserStore::new();
        let inserted = store.create_many_skip_duplicates(&batch()).await.unwrap();
        assert_eq!(inserted, 2);

        let users = store.find_many().await.unwrap();
        let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(users[0].name, "Path");
        assert_eq!(users[1].email, "john@example.com");
    }

    #[tokio::test]
    async fn test_existing_emails_are_skipped() {
        let store = InMemoryUserStore::new();
        store.create_many_skip_duplicates(&batch()).await.unwrap();

        let again = store.create_many_skip_duplicates(&batch()).await.unwrap();
        assert_eq!(again, 0);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicates_within_one_batch_keep_first() {
        let store = InMemoryUserStore::new();
        let users = vec![
            NewUser::new("Alice", "alice@example.com"),
            NewUser::new("Alice Again", "alice@example.com"),
        ];

        let inserted = store.create_many_skip_duplicates(&users).await.unwrap();
        assert_eq!(inserted, 1);

        let rows = store.find_many().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_skipped_rows_do_not_consume_ids() {
        let store = InMemoryUserStore::new();
        store.create_many_skip_duplicates(&batch()).await.unwrap();
        store
            .create_many_skip_duplicates(&[
                NewUser::new("John", "john@example.com"),
                NewUser::new("Bob", "bob@example.com"),
            ])
            .await
            .unwrap();

        let bob = store
            .find_many()
            .await
            .unwrap()
            .into_iter()
            .find(|u| u.email == "bob@example.com")
            .unwrap();
        assert_eq!(bob.id, 3);
    }

    #[tokio::test]
    async fn test_clones_share_the_table() {
        let store = InMemoryUserStore::new();
        let other = store.clone();

        store.create_many_skip_duplicates(&batch()).await.unwrap();
        other.close().await;

        assert_eq!(store.len().await, 2);
        assert!(!store.is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_batch_inserts_nothing() {
        let store = InMemoryUserStore::new();
        assert_eq!(store.create_many_skip_duplicates(&[]).await.unwrap(), 0);
        assert!(store.is_empty().await);
    }
}
