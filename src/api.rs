//! Backend client for the users, groups and events resources.
//!
//! Every operation goes through [`handle_response`], which turns non-success
//! statuses into an [`ApiError`] carrying the server's `message` when it sent
//! one.

use crate::errors::ApiError;
use crate::models::{Event, Group, NewEvent, NewGroup, NewUser, User};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the backend at `origin`, e.g. `http://127.0.0.1:8080`.
    pub fn new(origin: &str) -> Result<Self, reqwest::Error> {
        let http = Client::builder().build()?;
        Ok(Self::with_client(origin, http))
    }

    pub fn with_client(origin: &str, http: Client) -> Self {
        Self {
            http,
            base_url: format!("{}{API_PREFIX}", origin.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/users").await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post("/users", user).await
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.get("/groups").await
    }

    pub async fn create_group(&self, group: &NewGroup) -> Result<Group, ApiError> {
        self.post("/groups", group).await
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        self.get("/events").await
    }

    pub async fn create_event(&self, group_id: i64, event: &NewEvent) -> Result<Event, ApiError> {
        self.post(&format!("/events/group/{group_id}"), event).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await.map_err(|err| {
            warn!(%url, "request failed: {err}");
            ApiError::from(err)
        })?;
        handle_response(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "POST");
        // `json` also sets the content-type header.
        let response = self.http.post(&url).json(body).send().await.map_err(|err| {
            warn!(%url, "request failed: {err}");
            ApiError::from(err)
        })?;
        handle_response(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

pub async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        let message = error_message(status, &body);
        warn!(status = status.as_u16(), "backend rejected request: {message}");
        return Err(ApiError::new(message));
    }

    Ok(response.json::<T>().await?)
}

/// Server-supplied `message` from a JSON error body, or a status-coded
/// fallback when the body is not JSON or carries no usable message.
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP Error: {}", status.as_u16()))
}
