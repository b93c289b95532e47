//! LINE Messaging API adapter — webhook payloads, signatures, outbound
//! messages and the reply client.

pub mod client;
pub mod event;
pub mod message;
pub mod signature;

pub use client::{LineClient, MessagingApi};
pub use event::{Event, WebhookBody};
pub use message::Message;
pub use signature::{SIGNATURE_HEADER, verify_signature};
