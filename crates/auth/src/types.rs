//! Credential and authentication-state types

use serde::{Deserialize, Serialize};

/// OAuth credentials as issued by the token endpoint
///
/// Credentials are all-or-nothing: the SDK holds either a complete set or
/// none at all (`Option<Credentials>`), never a partial one. The access
/// token is a three-segment JWT-like string; its payload segment is the only
/// part the SDK ever inspects (see [`crate::jwt`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds, as reported at issue time
    pub expires_in: i64,
}

/// Token endpoint response (RFC 6749)
///
/// Kept separate from [`Credentials`] so wire-only fields can come and go
/// without touching the stored shape.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<TokenResponse> for Credentials {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
        }
    }
}

/// Error code attached to a failed authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthErrorCode {
    /// Initial or re-authentication failed
    #[serde(rename = "AUTH_ERROR")]
    AuthError,
    /// A manual or forced refresh failed
    #[serde(rename = "REFRESH_ERROR")]
    RefreshError,
}

/// Typed error surfaced through [`AuthState`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthError {
    pub message: String,
    pub code: AuthErrorCode,
}

impl AuthError {
    #[must_use]
    pub fn new(message: impl Into<String>, code: AuthErrorCode) -> Self {
        Self { message: message.into(), code }
    }
}

/// Snapshot of the session's authentication state
///
/// Derived, never stored: `is_authenticated` means credentials are present,
/// `network_user_id` is the `subn` claim extracted at transition time (and
/// `None` disables tracker creation downstream).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    pub is_authenticating: bool,
    pub is_authenticated: bool,
    pub credentials: Option<Credentials>,
    pub network_user_id: Option<String>,
    pub error: Option<AuthError>,
}
