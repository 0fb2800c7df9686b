//! Bearer-token payload inspection
//!
//! Decodes the payload segment of the access token to read expiry and the
//! network-user identifier. No signature verification happens here — the
//! token is opaque proof for the server; the client only peeks at claims it
//! needs locally. Every decoding failure degrades to "absent", never to an
//! error.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::Utc;
use serde::Deserialize;

use crate::types::Credentials;

/// Claims the SDK reads from the access-token payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    /// Expiry, seconds since the epoch
    pub exp: i64,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    pub iss: String,
    pub sub: String,
    /// Network user id; absent for tokens issued without tracking consent
    #[serde(default)]
    pub subn: Option<String>,
}

/// Decode the claims of a three-segment token
///
/// Splits on `.`, requires exactly three segments, base64url-decodes the
/// middle one and parses it as JSON. Returns `None` on any failure — wrong
/// segment count, invalid base64, invalid JSON.
#[must_use]
pub fn decode_claims(token: &str) -> Option<Claims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return None;
    }

    // Tokens in the wild carry either base64url or standard alphabet
    // payloads; accept both, unpadded.
    let payload = URL_SAFE_NO_PAD
        .decode(segments[1])
        .or_else(|_| STANDARD_NO_PAD.decode(segments[1]))
        .ok()?;

    serde_json::from_slice(&payload).ok()
}

/// Whether the credentials' access token has expired
///
/// Absent credentials, an empty access token, an undecodable payload, and an
/// `exp` in the past all count as expired — every one of them means a
/// network round-trip is needed before the token can be used.
#[must_use]
pub fn has_expired(credentials: Option<&Credentials>) -> bool {
    let Some(credentials) = credentials else {
        return true;
    };
    if credentials.access_token.is_empty() {
        return true;
    }

    match decode_claims(&credentials.access_token) {
        Some(claims) => claims.exp < Utc::now().timestamp(),
        None => true,
    }
}

/// Extract the network user id (`subn` claim) from the access token
///
/// Returns `None` under all the failure conditions of [`has_expired`] and
/// additionally when the claim is absent or empty. A `None` here disables
/// tracker creation downstream.
#[must_use]
pub fn network_user_id(credentials: Option<&Credentials>) -> Option<String> {
    let credentials = credentials?;
    if credentials.access_token.is_empty() {
        return None;
    }

    let claims = decode_claims(&credentials.access_token)?;
    match claims.subn {
        Some(subn) if !subn.is_empty() => Some(subn),
        _ => None,
    }
}
