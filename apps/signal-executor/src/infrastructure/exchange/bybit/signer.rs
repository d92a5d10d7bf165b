//! Bybit V5 request signing.
//!
//! `sign = hex(HMAC_SHA256(secret, timestamp + api_key + recv_window + payload))`
//! where the payload is the query string for GET and the raw JSON body for POST.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::error::BybitError;

type HmacSha256 = Hmac<Sha256>;

/// Signs private API requests.
#[derive(Clone)]
pub struct RequestSigner {
    api_key: String,
    api_secret: String,
    recv_window_ms: u64,
}

impl RequestSigner {
    /// Create a signer.
    #[must_use]
    pub const fn new(api_key: String, api_secret: String, recv_window_ms: u64) -> Self {
        Self {
            api_key,
            api_secret,
            recv_window_ms,
        }
    }

    /// API key sent in `X-BAPI-API-KEY`.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Receive window sent in `X-BAPI-RECV-WINDOW`.
    #[must_use]
    pub const fn recv_window_ms(&self) -> u64 {
        self.recv_window_ms
    }

    /// Signature for a request issued at `timestamp_ms`.
    pub fn sign(&self, timestamp_ms: i64, payload: &str) -> Result<String, BybitError> {
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .map_err(|_| BybitError::MissingCredentials)?;
        mac.update(timestamp_ms.to_string().as_bytes());
        mac.update(self.api_key.as_bytes());
        mac.update(self.recv_window_ms.to_string().as_bytes());
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("recv_window_ms", &self.recv_window_ms)
            .finish()
    }
}
