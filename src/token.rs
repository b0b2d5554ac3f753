//! Structural decoding of the Google identity token.
//! The token is only split and parsed here, never cryptographically
//! verified; validity is the remote authority's call.

use base64::Engine;
use serde::Deserialize;

use crate::error::{SessionError, SessionResult};

/// The subset of token claims the session layer consumes. Unknown payload
/// fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct IdClaims {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// Decode the claims segment of a three-segment token.
/// Fails with [`SessionError::Decode`] on any structural problem.
pub fn decode_claims(token: &str) -> SessionResult<IdClaims> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_sig), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(SessionError::decode("token does not have three segments"));
    };
    // Tokens are unpadded base64url; tolerate padding from sloppy issuers.
    let raw = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| SessionError::decode(format!("claims segment is not base64url: {e}")))?;
    serde_json::from_slice(&raw)
        .map_err(|e| SessionError::decode(format!("claims segment is not valid JSON: {e}")))
}
