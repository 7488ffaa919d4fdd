// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Orbitah API client.
//!
//! Handles:
//! - Bearer token attachment from durable storage
//! - Session invalidation on any 401 answer
//! - FastAPI error detail extraction
//!
//! There is no retry, backoff or request deduplication; timeouts are the
//! transport defaults.

use super::session::SessionCell;
use crate::error::{ClientError, Result};
use crate::models::{Token, User, UserCreate, UserLogin};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// `skip`/`limit` pagination for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    fn query(self) -> [(&'static str, String); 2] {
        [("skip", self.skip.to_string()), ("limit", self.limit.to_string())]
    }
}

/// Which bearer token a request carries.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Auth<'a> {
    /// Token from durable storage, if any
    Stored,
    /// A token that is not persisted yet
    Bearer(&'a str),
}

/// Orbitah API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionCell>,
}

impl ApiClient {
    /// Create a client for `base_url` sharing credentials with `session`.
    pub fn new(base_url: &str, session: Arc<SessionCell>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session state shared with the client's 401 handling.
    pub fn session_cell(&self) -> &Arc<SessionCell> {
        &self.session
    }

    // ─── Auth ────────────────────────────────────────────────────────────────

    /// Create an account. The backend answers with the new user, no token.
    pub async fn register(&self, user: &UserCreate) -> Result<User> {
        self.send(Method::POST, "/auth/register", Some(user), &[], Auth::Stored)
            .await
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, credentials: &UserLogin) -> Result<Token> {
        self.send(
            Method::POST,
            "/auth/login",
            Some(credentials),
            &[],
            Auth::Stored,
        )
        .await
    }

    /// Current user for the stored token.
    pub async fn current_user(&self) -> Result<User> {
        self.get("/auth/me").await
    }

    /// Current user for a token that has not been persisted yet.
    pub(crate) async fn current_user_with_token(&self, access_token: &str) -> Result<User> {
        self.send(
            Method::GET,
            "/auth/me",
            None::<&()>,
            &[],
            Auth::Bearer(access_token),
        )
        .await
    }

    // ─── Generic helpers ─────────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None::<&()>, &[], Auth::Stored)
            .await
    }

    pub(crate) async fn list<T: DeserializeOwned>(&self, path: &str, page: Page) -> Result<Vec<T>> {
        self.send(Method::GET, path, None::<&()>, &page.query(), Auth::Stored)
            .await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::POST, path, Some(body), &[], Auth::Stored)
            .await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::PUT, path, Some(body), &[], Auth::Stored)
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, None::<&()>, &[], Auth::Stored)
            .await
    }

    /// Send a request and decode a JSON answer.
    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        query: &[(&str, String)],
        auth: Auth<'_>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if !query.is_empty() {
            request = request.query(query);
        }

        match auth {
            Auth::Bearer(token) => request = request.bearer_auth(token),
            Auth::Stored => {
                if let Some(token) = self.session.credentials().token()? {
                    request = request.bearer_auth(token);
                }
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(method = %method, path, "API request");

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        self.check_response_json(path, response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(&body);

            // Any 401 wipes the session, whichever endpoint produced it
            if status.as_u16() == 401 {
                tracing::warn!(path, "Unauthorized response, clearing session");
                self.session.invalidate();
                return Err(ClientError::Unauthorized(detail));
            }

            return Err(ClientError::Api {
                status: status.as_u16(),
                message: detail.unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("Request failed").to_string()
                }),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("{}: {}", path, e)))
    }
}

/// Build `/{collection}/{id}` with the id URL-encoded.
pub(crate) fn resource_path(collection: &str, id: &str) -> String {
    format!("/{}/{}", collection, urlencoding::encode(id))
}

/// Pull a human-readable message out of a FastAPI error body.
///
/// `detail` is either a string or a list of `{loc, msg}` validation entries.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail_string() {
        let body = r#"{"detail":"Incorrect email or password"}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("Incorrect email or password")
        );
    }

    #[test]
    fn test_extract_detail_validation_list() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"},{"loc":["body","password"],"msg":"field required"}]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn test_extract_detail_absent() {
        assert!(extract_detail("Internal Server Error").is_none());
        assert!(extract_detail(r#"{"error":"x"}"#).is_none());
        assert!(extract_detail(r#"{"detail":""}"#).is_none());
    }

    #[test]
    fn test_resource_path_encodes_ids() {
        assert_eq!(resource_path("goals", "abc"), "/goals/abc");
        assert_eq!(resource_path("goals", "a/b c"), "/goals/a%2Fb%20c");
    }

    #[test]
    fn test_default_page() {
        let page = Page::default();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 100);
    }
}
