//! JWT payload decoding
//!
//! Reads the claims of a session token without verifying its signature. The
//! result only drives what the navigation shows; the backend still enforces
//! every request on its own.

use crate::domain::ClaimsRecord;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use thiserror::Error;

/// Token decoding errors. Callers treat every variant as "no session".
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Missing token")]
    MissingToken,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid base64url payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Token payload is not a JSON object")]
    NotAnObject,

    #[error("Token has expired")]
    Expired,
}

/// Outcome of decoding the current session token
pub type DecodedClaims = std::result::Result<ClaimsRecord, DecodeError>;

/// Decode the payload segment of a session token into its claims.
///
/// Accepts either the bare token or an `Authorization` header value using the
/// Bearer scheme.
pub fn decode(token: &str) -> DecodedClaims {
    let token = strip_bearer(token.trim());
    if token.is_empty() {
        return Err(DecodeError::MissingToken);
    }

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let payload = segments[1];
    if payload.is_empty() {
        return Err(DecodeError::MalformedToken("empty payload segment".to_string()));
    }

    // Some issuers keep the padding; the engine is configured without it.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    match serde_json::from_slice::<Value>(&bytes)? {
        Value::Object(claims) => Ok(ClaimsRecord::new(claims)),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Decode an optional token; absence is reported as `MissingToken`.
pub fn decode_optional(token: Option<&str>) -> DecodedClaims {
    token.map_or(Err(DecodeError::MissingToken), decode)
}

fn strip_bearer(value: &str) -> &str {
    if value.eq_ignore_ascii_case("bearer") {
        return "";
    }
    match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => value,
    }
}
