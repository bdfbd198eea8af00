use async_trait::async_trait;
use sqlx::{
    Connection, PgConnection, Postgres, QueryBuilder,
    postgres::PgConnectOptions,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::{NewUser, User};
use crate::store::UserStore;

/// PostgreSQL-backed user store holding a single connection.
pub struct Database {
    conn: Mutex<PgConnection>,
}

impl Database {
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens one connection to the database described by `options`.
    ///
    /// A single attempt is made; the driver's error is kept as the source
    /// of [`AppError::Connection`].
    pub async fn connect(options: &PgConnectOptions) -> Result<Self, AppError> {
        let conn = PgConnection::connect_with(options)
            .await
            .map_err(AppError::Connection)?;

        info!("Connected to database");
        Ok(Self::new(conn))
    }

    /// Runs a statement with no bound parameters on this connection.
    pub async fn execute_raw(&self, sql: &str) -> Result<u64, AppError> {
        let mut conn = self.conn.lock().await;
        let result = sqlx::query(sql).execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserStore for Database {
    async fn create_many_skip_duplicates(&self, users: &[NewUser]) -> Result<u64, AppError> {
        if users.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO users (name, email) ");
        builder.push_values(users, |mut row, user| {
            row.push_bind(&user.name).push_bind(&user.email);
        });
        builder.push(" ON CONFLICT (email) DO NOTHING");

        let mut conn = self.conn.lock().await;
        let result = builder.build().execute(&mut *conn).await?;
        debug!(
            requested = users.len(),
            inserted = result.rows_affected(),
            "Batch insert finished"
        );

        Ok(result.rows_affected())
    }

    async fn find_many(&self) -> Result<Vec<User>, AppError> {
        let mut conn = self.conn.lock().await;
        let users: Vec<User> = sqlx::query_as(
            r#"
            SELECT id, name, email
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(users)
    }

    async fn close(self) {
        match self.conn.into_inner().close().await {
            Ok(()) => info!("Database connection closed"),
            Err(e) => warn!("Database connection closed uncleanly: {e}"),
        }
    }
}
