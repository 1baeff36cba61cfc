//! Persistence for [`User`] records.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{User, UserInput};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("user {0} not found")]
    NotFound(i64),

    #[error("email '{0}' is already in use")]
    DuplicateEmail(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Single-row CRUD over the user table. Each call is its own unit of work.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, most recently created first.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    async fn get(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn create(&self, input: UserInput) -> Result<User, RepositoryError>;

    /// Replace every writable field and refresh `updated_at`.
    async fn update(&self, id: i64, input: UserInput) -> Result<User, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
