//! User storage for the seeder.
//!
//! [`Database`] talks to PostgreSQL; [`InMemoryUserStore`] keeps rows in
//! process memory with the same uniqueness rules. Both implement
//! [`UserStore`], which is what the seed flow is written against.

pub mod database;
pub mod errors;
pub mod memory;
pub mod models;
pub mod store;

pub use database::Database;
pub use errors::AppError;
pub use memory::InMemoryUserStore;
pub use models::{NewUser, User};
pub use store::UserStore;
