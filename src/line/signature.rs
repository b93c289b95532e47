//! LINE webhook signature verification.
//!
//! LINE signs each webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the channel secret, and sends the base64 digest in the
//! `x-line-signature` header.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::ChannelError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Compute the base64 signature LINE would send for `body`.
pub fn sign(channel_secret: &str, body: &[u8]) -> Result<String, ChannelError> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).map_err(|e| {
        ChannelError::AuthFailed {
            name: "line".into(),
            reason: format!("Failed to initialize HMAC: {e}"),
        }
    })?;
    mac.update(body);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Verify an `x-line-signature` header value against the raw body.
///
/// Returns `false` on any error (bad base64, wrong length, mismatch).
pub fn verify_signature(channel_secret: &str, signature: &str, body: &[u8]) -> bool {
    let Ok(expected_sig) = STANDARD.decode(signature.trim()) else {
        return false;
    };

    // SHA-256 produces 32-byte signatures - reject wrong lengths early
    if expected_sig.len() != 32 {
        return false;
    }

    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(body);
    let computed_sig = mac.finalize().into_bytes();

    computed_sig
        .as_slice()
        .ct_eq(expected_sig.as_slice())
        .into()
}
