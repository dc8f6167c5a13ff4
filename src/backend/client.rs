//! HTTP backend client for Smartmark.
//!
//! One configured `reqwest::Client` reused by every component. Row operations
//! speak the backend's REST surface (equality filters, descending order,
//! `Prefer: return=representation` on insert); the live feed is consumed as a
//! server-sent-event stream on a spawned task.

use std::sync::RwLock;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::types::bookmark::{Bookmark, NewBookmark};
use crate::types::change::ChangeEvent;
use crate::types::errors::{AuthError, FeedError, StoreError};

use super::feed::Subscription;
use super::{AuthApi, BookmarkStore, ChangeFeed};

const AUTH_USER_PATH: &str = "/auth/v1/user";
const AUTH_AUTHORIZE_PATH: &str = "/auth/v1/authorize";
const BOOKMARKS_PATH: &str = "/rest/v1/bookmarks";
const FEED_PATH: &str = "/realtime/v1/bookmarks";

/// Identity payload returned by the "current caller" endpoint.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
}

/// Production backend client: one connection/credentials object shared by
/// all components via `Arc`, lifecycle owned by the composition root.
pub struct HttpBackend {
    http: reqwest::Client,
    config: Config,
    access_token: RwLock<Option<String>>,
}

impl HttpBackend {
    /// Creates a client for the configured backend. No connection is opened
    /// until the first request.
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            access_token: RwLock::new(None),
        }
    }

    /// Installs (or clears) the bearer token obtained from the OAuth
    /// redirect. Without a token, `current_account` resolves to nobody.
    pub fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.access_token.write() {
            *slot = token;
        }
    }

    fn token(&self) -> Option<String> {
        self.access_token.read().ok().and_then(|slot| slot.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Base request with the API key and, when present, the bearer token.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, url)
            .header("apikey", &self.config.api_key);
        if let Some(token) = self.token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    /// Builds an endpoint URL with percent-encoded query pairs. Filter
    /// values like `eq.<id>` go through here so an id never breaks the
    /// query string.
    fn filtered_url(&self, path: &str, pairs: &[(&str, &str)]) -> Result<reqwest::Url, String> {
        let mut url = reqwest::Url::parse(&self.endpoint(path)).map_err(|e| e.to_string())?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in pairs {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Turns a non-success store response into the backend's own message.
    async fn store_failure(response: reqwest::Response) -> StoreError {
        let status = response.status();
        match response.text().await {
            Ok(body) if !body.trim().is_empty() => StoreError::Backend(body),
            _ => StoreError::Backend(format!("Backend returned status {}", status)),
        }
    }
}

#[async_trait]
impl AuthApi for HttpBackend {
    async fn current_account(&self) -> Result<Option<String>, AuthError> {
        if self.token().is_none() {
            return Ok(None);
        }

        let response = self
            .request(Method::GET, &self.endpoint(AUTH_USER_PATH))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let user: UserPayload = response
                    .json()
                    .await
                    .map_err(|e| AuthError::Provider(e.to_string()))?;
                Ok(Some(user.id))
            }
            // An unusable token is the same as nobody being signed in.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => Err(AuthError::Provider(format!(
                "Identity lookup returned status {}",
                status
            ))),
        }
    }

    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthError> {
        if provider.trim().is_empty() {
            return Err(AuthError::Provider("No OAuth provider named".to_string()));
        }
        if redirect_to.trim().is_empty() {
            return Err(AuthError::InvalidRedirect(
                "Redirect address is empty".to_string(),
            ));
        }
        let mut url = reqwest::Url::parse(&self.endpoint(AUTH_AUTHORIZE_PATH))
            .map_err(|e| AuthError::InvalidRedirect(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("provider", provider)
            .append_pair("redirect_to", redirect_to);
        Ok(url.into())
    }
}

#[async_trait]
impl BookmarkStore for HttpBackend {
    async fn insert_bookmark(&self, new: &NewBookmark) -> Result<Bookmark, StoreError> {
        let response = self
            .request(Method::POST, &self.endpoint(BOOKMARKS_PATH))
            .header("Prefer", "return=representation")
            .json(new)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::store_failure(response).await);
        }

        // The store answers inserts with an array of created rows.
        let mut rows: Vec<Bookmark> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        rows.pop()
            .ok_or_else(|| StoreError::Decode("Insert returned no row".to_string()))
    }

    async fn list_bookmarks(&self, account_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        let filter = format!("eq.{}", account_id);
        let url = self
            .filtered_url(
                BOOKMARKS_PATH,
                &[
                    ("select", "*"),
                    ("account_id", &filter),
                    ("order", "created_at.desc"),
                ],
            )
            .map_err(StoreError::Network)?;
        let response = self
            .request(Method::GET, url.as_str())
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::store_failure(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn delete_bookmark(&self, id: &str) -> Result<(), StoreError> {
        let filter = format!("eq.{}", id);
        let url = self
            .filtered_url(BOOKMARKS_PATH, &[("id", &filter)])
            .map_err(StoreError::Network)?;
        let response = self
            .request(Method::DELETE, url.as_str())
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::store_failure(response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl ChangeFeed for HttpBackend {
    async fn subscribe(&self, account_id: &str) -> Result<Subscription, FeedError> {
        let filter = format!("eq.{}", account_id);
        let url = self
            .filtered_url(FEED_PATH, &[("account_id", &filter)])
            .map_err(FeedError::Connect)?;
        let response = self
            .request(Method::GET, url.as_str())
            .header(ACCEPT, HeaderValue::from_static("text/event-stream"))
            .send()
            .await
            .map_err(|e| FeedError::Connect(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Connect(format!(
                "Feed returned status {}",
                response.status()
            )));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let reader = tokio::spawn(async move {
            let mut stream = response.bytes_stream();
            let mut buffer = String::new();
            while let Some(chunk) = stream.next().await {
                let Ok(bytes) = chunk else { break };
                buffer.push_str(&String::from_utf8_lossy(&bytes));
                // Frames are separated by a blank line.
                while let Some(end) = buffer.find("\n\n") {
                    let frame: String = buffer.drain(..end + 2).collect();
                    if let Some(event) = parse_event_frame(&frame) {
                        if tx.send(event).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok(Subscription::new(rx, move || reader.abort()))
    }
}

/// Parses one server-sent-event frame into a change event.
///
/// Expects an `event:` line naming `insert` or `delete` and one or more
/// `data:` lines carrying the changed row as JSON. Frames that do not match
/// (comments, keep-alives, unknown events, undecodable rows) are skipped.
fn parse_event_frame(frame: &str) -> Option<ChangeEvent> {
    let mut event_name = "";
    let mut data = String::new();

    for line in frame.lines() {
        if let Some(rest) = line.strip_prefix("event:") {
            event_name = rest.trim();
        } else if let Some(rest) = line.strip_prefix("data:") {
            data.push_str(rest.trim_start());
        }
    }

    let row: Bookmark = serde_json::from_str(&data).ok()?;
    match event_name {
        "insert" => Some(ChangeEvent::Inserted(row)),
        "delete" => Some(ChangeEvent::Deleted(row)),
        _ => None,
    }
}
