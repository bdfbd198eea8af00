//! Shared test fixtures for seed flow tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use users::{AppError, InMemoryUserStore, NewUser, User, UserStore};

/// Which store call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailAt {
    #[default]
    Nowhere,
    Insert,
    Fetch,
}

/// Wraps an in-memory store, counting closes and injecting failures.
pub struct CountingStore {
    inner: InMemoryUserStore,
    fail_at: FailAt,
    closes: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new(inner: InMemoryUserStore, fail_at: FailAt) -> (Self, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        let store = Self {
            inner,
            fail_at,
            closes: Arc::clone(&closes),
        };
        (store, closes)
    }
}

pub fn close_count(closes: &AtomicUsize) -> usize {
    closes.load(Ordering::SeqCst)
}

#[async_trait]
impl UserStore for CountingStore {
    async fn create_many_skip_duplicates(&self, users: &[NewUser]) -> Result<u64, AppError> {
        if self.fail_at == FailAt::Insert {
            return Err(AppError::Storage(sqlx::Error::Protocol(
                "injected insert failure".to_string(),
            )));
        }
        self.inner.create_many_skip_duplicates(users).await
    }

    async fn find_many(&self) -> Result<Vec<User>, AppError> {
        if self.fail_at == FailAt::Fetch {
            return Err(AppError::Storage(sqlx::Error::Protocol(
                "injected fetch failure".to_string(),
            )));
        }
        self.inner.find_many().await
    }

    async fn close(self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await;
    }
}
