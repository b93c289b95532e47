//! Inbound webhook payloads from the LINE Messaging API.

use serde::Deserialize;

use crate::conversation::Input;

/// Top-level webhook request body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Where an event came from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// `user`, `group` or `room`.
    #[serde(rename = "type", default)]
    pub kind: String,
    pub user_id: Option<String>,
}

/// Message payload of a `message` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    Text { text: String },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postback {
    pub data: String,
}

/// A single webhook event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Message {
        /// Absent on events delivered while the channel is in standby.
        #[serde(rename = "replyToken", default)]
        reply_token: Option<String>,
        #[serde(default)]
        source: Source,
        message: MessageContent,
    },
    Postback {
        #[serde(rename = "replyToken", default)]
        reply_token: Option<String>,
        #[serde(default)]
        source: Source,
        postback: Postback,
    },
    Follow {
        #[serde(rename = "replyToken", default)]
        reply_token: Option<String>,
        #[serde(default)]
        source: Source,
    },
    Unfollow {
        #[serde(default)]
        source: Source,
    },
    #[serde(other)]
    Unsupported,
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Message { .. } => "message",
            Self::Postback { .. } => "postback",
            Self::Follow { .. } => "follow",
            Self::Unfollow { .. } => "unfollow",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn reply_token(&self) -> Option<&str> {
        match self {
            Self::Message { reply_token, .. }
            | Self::Postback { reply_token, .. }
            | Self::Follow { reply_token, .. } => reply_token.as_deref(),
            Self::Unfollow { .. } | Self::Unsupported => None,
        }
    }

    pub fn source(&self) -> Option<&Source> {
        match self {
            Self::Message { source, .. }
            | Self::Postback { source, .. }
            | Self::Follow { source, .. }
            | Self::Unfollow { source } => Some(source),
            Self::Unsupported => None,
        }
    }

    /// The sending user's id, if the platform shared one.
    pub fn user_id(&self) -> Option<&str> {
        self.source().and_then(|s| s.user_id.as_deref())
    }

    /// What the user sent, as conversation input.
    pub fn input(&self) -> Option<Input> {
        match self {
            Self::Message {
                message: MessageContent::Text { text },
                ..
            } => Some(Input::Text(text.clone())),
            Self::Message { .. } | Self::Follow { .. } => Some(Input::Other),
            Self::Postback { postback, .. } => Some(Input::Postback(postback.data.clone())),
            Self::Unfollow { .. } | Self::Unsupported => None,
        }
    }
}
