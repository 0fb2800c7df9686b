//! PKCE (Proof Key for Code Exchange) implementation for OAuth 2.0
//!
//! Implements RFC 7636 for authorization without client secrets. Used by
//! client applications where a secret cannot be safely embedded.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;
use sha2::{Digest, Sha256};

/// RFC 3986 unreserved characters, the verifier alphabet per RFC 7636.
const VERIFIER_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";

/// Verifier length in characters. RFC 7636 allows 43-128; the Dressipi
/// endpoints expect the minimum.
const VERIFIER_LEN: usize = 43;

/// Generate a code verifier
///
/// Returns a random 43-character string drawn uniformly from the RFC 3986
/// unreserved set `[A-Za-z0-9\-._~]`.
#[must_use]
pub fn generate_code_verifier() -> String {
    let mut rng = rand::thread_rng();
    (0..VERIFIER_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..VERIFIER_CHARSET.len());
            VERIFIER_CHARSET[idx] as char
        })
        .collect()
}

/// Generate the code challenge for a verifier using SHA256
///
/// Per RFC 7636 the challenge is BASE64URL(SHA256(ASCII(code_verifier)))
/// without padding — 43 characters for a 256-bit digest.
#[must_use]
pub fn generate_code_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Generate a random state token for CSRF protection
///
/// Returns a URL-safe base64-encoded random string of 32 bytes (43
/// characters). The authorization response must echo it back unchanged.
#[must_use]
pub fn generate_state() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// PKCE challenge pair for one authorization round-trip
///
/// Generated fresh per authentication attempt and never persisted; the
/// verifier stays local until the token exchange, the challenge and state go
/// out with the authorization request.
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    /// Random 43-char string, kept secret until token exchange
    pub code_verifier: String,

    /// SHA256 hash of `code_verifier` (base64url, no padding)
    pub code_challenge: String,

    /// Random CSRF protection token
    pub state: String,
}

impl PkceChallenge {
    /// Generate a new challenge with fresh random values
    #[must_use]
    pub fn generate() -> Self {
        let code_verifier = generate_code_verifier();
        let code_challenge = generate_code_challenge(&code_verifier);
        let state = generate_state();

        Self { code_verifier, code_challenge, state }
    }

    /// Challenge method sent alongside the challenge (always "S256")
    #[must_use]
    pub fn challenge_method(&self) -> &str {
        "S256"
    }
}
