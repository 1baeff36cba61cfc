//! In-memory user store, used by tests and for running without Postgres.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{RepositoryError, UserRepository};
use crate::models::{User, UserInput};

#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn email_taken(users: &HashMap<i64, User>, email: &str, except: Option<i64>) -> bool {
    users
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(result)
    }

    async fn get(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, input: UserInput) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;

        if email_taken(&users, &input.email, None) {
            return Err(RepositoryError::DuplicateEmail(input.email));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            role: input.role,
            created_at: now,
            updated_at: now,
        };

        users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, id: i64, input: UserInput) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&id) {
            return Err(RepositoryError::NotFound(id));
        }

        if email_taken(&users, &input.email, Some(id)) {
            return Err(RepositoryError::DuplicateEmail(input.email));
        }

        let user = users.get_mut(&id).ok_or(RepositoryError::NotFound(id))?;
        user.name = input.name;
        user.email = input.email;
        user.phone = input.phone;
        user.role = input.role;
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;

        match users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(id)),
        }
    }
}
