//! LINE Messaging API client — delivers replies to webhook events.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use super::message::Message;
use crate::error::ChannelError;

pub const DEFAULT_API_BASE: &str = "https://api.line.me";

/// LINE accepts at most this many messages per reply.
pub const MAX_REPLY_MESSAGES: usize = 5;

/// Outbound side of the messaging platform.
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Reply to an event using its one-shot reply token.
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), ChannelError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: &'a [Message],
}

/// HTTP client for the LINE reply API.
pub struct LineClient {
    access_token: SecretString,
    api_base: String,
    client: reqwest::Client,
}

impl LineClient {
    pub fn new(access_token: SecretString) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChannelError::Http(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            access_token,
            api_base: DEFAULT_API_BASE.to_string(),
            client,
        })
    }

    /// Point the client at a different API host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v2/bot/{path}", self.api_base)
    }
}

#[async_trait]
impl MessagingApi for LineClient {
    async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), ChannelError> {
        if messages.is_empty() {
            return Ok(());
        }
        if messages.len() > MAX_REPLY_MESSAGES {
            return Err(ChannelError::InvalidMessage(format!(
                "reply carries {} messages, LINE allows {MAX_REPLY_MESSAGES}",
                messages.len()
            )));
        }

        let body = ReplyRequest {
            reply_token,
            messages: &messages,
        };

        let resp = self
            .client
            .post(self.api_url("message/reply"))
            .bearer_auth(self.access_token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                name: "line".into(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(ChannelError::SendFailed {
                name: "line".into(),
                reason: format!("reply failed ({status}): {detail}"),
            });
        }

        debug!(count = messages.len(), "LINE reply sent");
        Ok(())
    }
}
