//! HTTP client for the user dashboard.
//!
//! Holds the last fetched collection and a local search term. Every write
//! re-fetches the whole collection on success instead of patching the cache.
//! A write that succeeded is reported as such even when that re-fetch fails.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{User, UserInput};

pub mod filter;

pub use filter::{filter_users, matches_search};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

#[derive(Debug, Deserialize)]
struct MessagePayload {
    message: String,
}

#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
    users: Vec<User>,
    search: String,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            users: Vec::new(),
            search: String::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    /// Last fetched collection, unfiltered.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Cached users matching the current search term.
    pub fn visible(&self) -> Vec<&User> {
        filter_users(&self.users, &self.search)
    }

    pub async fn refresh(&mut self) -> Result<&[User], ClientError> {
        let result = match self.http.get(self.collection_url()).send().await {
            Ok(response) => decode::<Vec<User>>(response).await,
            Err(e) => Err(ClientError::from(e)),
        };

        match result {
            Ok(users) => {
                self.users = users;
                Ok(&self.users)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch users");
                Err(e)
            }
        }
    }

    /// The write has already been committed, so a failed re-fetch only leaves
    /// the cached collection stale.
    async fn refresh_after_write(&mut self) {
        if self.refresh().await.is_err() {
            tracing::warn!("Keeping stale user list after a committed write");
        }
    }

    pub async fn get(&self, id: i64) -> Result<User, ClientError> {
        let response = self.http.get(self.item_url(id)).send().await?;

        decode(response).await.inspect_err(|e| {
            tracing::warn!(user_id = id, error = %e, "Failed to fetch user");
        })
    }

    pub async fn create(&mut self, input: &UserInput) -> Result<User, ClientError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(input)
            .send()
            .await?;

        let user: User = decode(response).await.inspect_err(|e| {
            tracing::warn!(error = %e, "Failed to create user");
        })?;

        self.refresh_after_write().await;
        Ok(user)
    }

    pub async fn update(&mut self, id: i64, input: &UserInput) -> Result<User, ClientError> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(input)
            .send()
            .await?;

        let user: User = decode(response).await.inspect_err(|e| {
            tracing::warn!(user_id = id, error = %e, "Failed to update user");
        })?;

        self.refresh_after_write().await;
        Ok(user)
    }

    /// Returns the server's confirmation message.
    pub async fn delete(&mut self, id: i64) -> Result<String, ClientError> {
        let response = self.http.delete(self.item_url(id)).send().await?;

        let confirmation: MessagePayload = decode(response).await.inspect_err(|e| {
            tracing::warn!(user_id = id, error = %e, "Failed to delete user");
        })?;

        self.refresh_after_write().await;
        Ok(confirmation.message)
    }
}

async fn decode<T>(response: Response) -> Result<T, ClientError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorPayload>().await {
        Ok(payload) => payload.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unexpected response")
            .to_string(),
    };

    Err(ClientError::Api { status, message })
}
