use serde::Deserialize;
use serde::Serialize;

/// Signing algorithm advertised in every token header.
pub const ALGORITHM: &str = "HS256";

/// Token header segment.
///
/// Serialized as `{"Algorithm":"HS256"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "Algorithm")]
    pub algorithm: String,
}

impl Header {
    pub fn hs256() -> Self {
        Self {
            algorithm: ALGORITHM.to_string(),
        }
    }
}

/// Token payload segment.
///
/// Serialized as `{"UserId":<id>,"Iat":<unix seconds>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Principal the token was issued to
    #[serde(rename = "UserId")]
    pub user_id: i64,

    /// Issued at (Unix timestamp)
    #[serde(rename = "Iat")]
    pub issued_at: i64,
}

impl Claims {
    pub fn new(user_id: i64, issued_at: i64) -> Self {
        Self { user_id, issued_at }
    }

    /// Last Unix timestamp at which the token is still accepted.
    pub fn expires_at(&self, ttl_seconds: i64) -> i64 {
        self.issued_at.saturating_add(ttl_seconds)
    }

    /// Check if the token is expired at `now`.
    pub fn is_expired(&self, ttl_seconds: i64, now: i64) -> bool {
        self.expires_at(ttl_seconds) < now
    }
}
