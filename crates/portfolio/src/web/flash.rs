//! One-shot flash messages carried between requests in a signed cookie.
//!
//! The cookie value is `<base64url(json)>.<hex mac>`, where the MAC is a
//! BLAKE3 keyed hash under a key derived from the site secret. Cookies that
//! fail verification are treated as absent.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Name of the cookie holding pending flashes.
pub const FLASH_COOKIE: &str = "portfolio_flash";

/// Context string for deriving the signing key from the site secret.
const KEY_CONTEXT: &str = "portfolio flash-cookie signing key v1";

const COOKIE_ATTRIBUTES: &str = "Path=/; HttpOnly; SameSite=Lax";

/// Largest `Set-Cookie` value we emit. Browsers drop cookies past about 4 KB.
pub const MAX_COOKIE_BYTES: usize = 4000;

/// Longest piece of user input repeated inside a flash message.
pub const MAX_ECHO_CHARS: usize = 100;

/// How a flash should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    /// Confirmation of a completed action.
    Success,
    /// A validation or processing problem.
    Error,
}

impl FlashCategory {
    /// CSS class suffix for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Display category.
    pub category: FlashCategory,
    /// Message text (unescaped).
    pub message: String,
}

impl Flash {
    /// A success flash.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Success,
            message: message.into(),
        }
    }

    /// An error flash.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: FlashCategory::Error,
            message: message.into(),
        }
    }
}

/// Key that signs and verifies flash cookies.
#[derive(Clone)]
pub struct FlashKey([u8; 32]);

impl std::fmt::Debug for FlashKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FlashKey(..)")
    }
}

impl FlashKey {
    /// Derive the signing key from the configured site secret.
    #[must_use]
    pub fn from_secret(secret: &str) -> Self {
        Self(blake3::derive_key(KEY_CONTEXT, secret.as_bytes()))
    }

    /// Serialize and sign a list of flashes into a cookie value.
    ///
    /// # Errors
    ///
    /// Returns an error if the flashes cannot be serialized.
    pub fn encode(&self, flashes: &[Flash]) -> Result<String> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(flashes)?);
        let mac = blake3::keyed_hash(&self.0, payload.as_bytes());
        Ok(format!("{payload}.{}", mac.to_hex()))
    }

    /// Verify and deserialize a cookie value. Returns `None` if it was
    /// tampered with, signed under another key, or malformed.
    #[must_use]
    pub fn decode(&self, value: &str) -> Option<Vec<Flash>> {
        let (payload, mac_hex) = value.rsplit_once('.')?;
        let mac = blake3::Hash::from_hex(mac_hex).ok()?;
        // blake3::Hash equality is constant time
        if blake3::keyed_hash(&self.0, payload.as_bytes()) != mac {
            debug!("Ignoring flash cookie with bad signature");
            return None;
        }
        let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Read pending flashes from request headers.
    ///
    /// Returns `None` when no flash cookie was sent, and `Some` (possibly
    /// empty, if the cookie did not verify) when one was.
    #[must_use]
    pub fn read(&self, headers: &HeaderMap) -> Option<Vec<Flash>> {
        cookie_value(headers, FLASH_COOKIE).map(|value| self.decode(value).unwrap_or_default())
    }

    /// Build a `Set-Cookie` header value queuing `flashes`.
    ///
    /// The oldest flashes are dropped until the header fits in
    /// [`MAX_COOKIE_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the newest flash alone is
    /// too large.
    pub fn set_cookie(&self, flashes: &[Flash]) -> Result<HeaderValue> {
        let mut kept = flashes;
        loop {
            let header = format!("{FLASH_COOKIE}={}; {COOKIE_ATTRIBUTES}", self.encode(kept)?);
            if header.len() <= MAX_COOKIE_BYTES {
                return HeaderValue::from_str(&header)
                    .map_err(|e| Error::internal(format!("invalid flash cookie header: {e}")));
            }
            match kept {
                [_, rest @ ..] if !rest.is_empty() => {
                    debug!("Dropping oldest flash to keep the cookie under {MAX_COOKIE_BYTES} bytes");
                    kept = rest;
                }
                _ => {
                    return Err(Error::internal(format!(
                        "flash cookie of {} bytes exceeds {MAX_COOKIE_BYTES}",
                        header.len()
                    )))
                }
            }
        }
    }
}

/// Shorten user input to [`MAX_ECHO_CHARS`] characters for use in a flash.
#[must_use]
pub fn abbreviate(text: &str) -> String {
    match text.char_indices().nth(MAX_ECHO_CHARS) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}

/// A `Set-Cookie` header value that deletes the flash cookie.
#[must_use]
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("portfolio_flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Find a cookie by name across all `Cookie` headers.
#[must_use]
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
