use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::claims::Claims;
use super::claims::Header;
use super::claims::ALGORITHM;
use super::errors::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime: 2 hours.
pub const DEFAULT_TTL_SECONDS: i64 = 2 * 60 * 60;

/// Compact, self-contained session token codec.
///
/// Tokens have the form `header.payload.signature`, each segment unpadded
/// base64url, the signature being HMAC-SHA256 over `header.payload`.
/// Nothing is stored server side: a token stays valid until its TTL elapses.
#[derive(Clone)]
pub struct TokenCodec {
    mac: HmacSha256,
    ttl_seconds: i64,
}

impl TokenCodec {
    /// Create a codec keyed with the process signing key.
    ///
    /// # Arguments
    /// * `signing_key` - Secret used for every token this codec issues or validates
    ///
    /// # Errors
    /// * `EmptySigningKey` - The key is empty
    pub fn new(signing_key: &[u8]) -> Result<Self, TokenError> {
        if signing_key.is_empty() {
            return Err(TokenError::EmptySigningKey);
        }

        let mac = HmacSha256::new_from_slice(signing_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(Self {
            mac,
            ttl_seconds: DEFAULT_TTL_SECONDS,
        })
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a token for `user_id`, stamped with `now` as issued-at.
    ///
    /// # Errors
    /// * `EncodingFailed` - Header or payload could not be serialized
    pub fn issue(&self, user_id: i64, now: i64) -> Result<String, TokenError> {
        let header = encode_segment(&Header::hs256())?;
        let payload = encode_segment(&Claims::new(user_id, now))?;

        let signing_input = format!("{}.{}", header, payload);
        let signature = self.sign(&signing_input);

        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Validate a token at `now` and return its claims.
    ///
    /// # Errors
    /// * `Malformed` - Not three segments, or a segment does not decode
    /// * `InvalidSignature` - Signature does not match the first two segments
    /// * `Expired` - `issued_at + ttl < now`
    ///
    /// The segment count is checked before the signature. An altered
    /// signature that now contains a `.` (flipping bit 6 of `n` does this)
    /// is therefore reported as `Malformed`, not `InvalidSignature`. Either
    /// way the token is rejected.
    pub fn validate(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        let &[header, payload, signature] = segments.as_slice() else {
            return Err(TokenError::Malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        };

        let expected = self.sign(&format!("{}.{}", header, payload));
        if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
            return Err(TokenError::InvalidSignature);
        }

        let header: Header = decode_segment(header)?;
        if header.algorithm != ALGORITHM {
            return Err(TokenError::Malformed(format!(
                "unsupported algorithm {}",
                header.algorithm
            )));
        }

        let claims: Claims = decode_segment(payload)?;
        if claims.is_expired(self.ttl_seconds, now) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Decode the payload segment without checking signature or expiry.
    ///
    /// # Security Warning
    /// Never trust the result for authorization decisions.
    pub fn decode_unverified(token: &str) -> Result<Claims, TokenError> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| TokenError::Malformed("missing payload segment".to_string()))?;

        decode_segment(payload)
    }

    fn sign(&self, signing_input: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|e| TokenError::EncodingFailed(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let json = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::Malformed(e.to_string()))?;

    serde_json::from_slice(&json).map_err(|e| TokenError::Malformed(e.to_string()))
}
