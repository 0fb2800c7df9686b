//! Wire-level constants shared across the SDK

/// Fixed out-of-band redirect URI used by the PKCE authorization request.
///
/// The Dressipi authorization endpoint answers the request directly with a
/// JSON `{code, state}` body instead of redirecting a browser, so the
/// standard OAuth 2.0 out-of-band URI is sent verbatim.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Reserved `content_id` value meaning "no similar items".
///
/// A `similar_items` block carrying this id (or an empty id) is omitted from
/// mapped responses rather than treated as an error.
pub const EMPTY_CONTENT_ID: &str = "000000000000000000000000";

/// Prefix for the derived key credential stores namespace entries under.
///
/// The stored key for a client is `"{CREDENTIAL_KEY_PREFIX}-{client_id}"`,
/// scoped to the server URL. A stored entry whose key does not match the
/// derived key for the requested client id is treated as absent.
pub const CREDENTIAL_KEY_PREFIX: &str = "dressipi";

/// Derive the storage key for a client id.
#[must_use]
pub fn credential_key(client_id: &str) -> String {
    format!("{CREDENTIAL_KEY_PREFIX}-{client_id}")
}
