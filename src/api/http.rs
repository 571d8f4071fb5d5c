// SPDX-License-Identifier: MPL-2.0
//! HTTP implementation of [`NotificationApi`] over the PharmaTrack REST
//! endpoints.
//!
//! Failure bodies are JSON with an optional human-readable field; the
//! client extracts the most specific one (`detail`, then `message`, then
//! `error`) so user-facing error banners can show the server's wording.

use super::{NotificationApi, NotificationItem};
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::json;

/// Client for the `/inventory/` notification and order endpoints.
#[derive(Debug, Clone)]
pub struct HttpNotificationApi {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpNotificationApi {
    /// Creates a client against the given API base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            auth_token: None,
        }
    }

    /// Attaches a bearer token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Posts to an acknowledgement-style endpoint, discarding the body on
    /// success.
    async fn post_ack(&self, path: &str) -> Result<()> {
        let response = self
            .authorize(self.client.post(self.url(path)).json(&json!({})))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Converts a non-success response into [`Error::Api`], keeping the
    /// server's message when the body has one.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
            .and_then(|value| {
                ["detail", "message", "error"]
                    .iter()
                    .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
            });

        Err(Error::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

#[async_trait]
impl NotificationApi for HttpNotificationApi {
    async fn list_notifications(&self) -> Result<Vec<NotificationItem>> {
        let response = self
            .authorize(self.client.get(self.url("/inventory/notifications/")))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn mark_read(&self, id: i64) -> Result<()> {
        self.post_ack(&format!("/inventory/notifications/{id}/mark-read/"))
            .await
    }

    async fn confirm_delivery(&self, order_id: i64) -> Result<()> {
        self.post_ack(&format!("/inventory/orders/{order_id}/confirm-delivery/"))
            .await
    }

    async fn accept_approval(&self, order_id: i64) -> Result<()> {
        self.post_ack(&format!("/inventory/orders/{order_id}/accept/"))
            .await
    }
}
