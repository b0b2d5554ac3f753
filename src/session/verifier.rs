//! Remote token verification against the DevTime backend.
//! The authority's wire contract overloads one field: `success` is either
//! the literal `false` or a string carrying the issued apiKey. That shape
//! is decoded here, once, into a tagged [`Verification`]; nothing outside
//! this module sees the raw response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Url;

use crate::error::{SessionError, SessionResult};

/// Outcome of a verification call that actually reached the authority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verification {
    pub valid: bool,
    /// Issued opaque credential for tooling integrations, when the
    /// authority supplied one.
    pub api_key: Option<String>,
}

/// Seam between the session store and the verification authority. Tests and
/// local-only deployments substitute their own implementation.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// `Ok(valid == false)` means the authority answered and rejected the
    /// token; `Err(Network)` means it could not be asked. Callers rely on
    /// that distinction for retry policy.
    async fn verify(&self, token: &str) -> SessionResult<Verification>;
}

/// HTTP implementation: `GET {base}/auth/login` with a bearer header.
#[derive(Clone)]
pub struct HttpVerifier {
    endpoint: Url,
    client: reqwest::Client,
}

impl HttpVerifier {
    /// `timeout: None` preserves the original no-timeout behavior; pass a
    /// duration to bound the call.
    pub fn new(api_base: &str, timeout: Option<Duration>) -> SessionResult<Self> {
        // The endpoint is the base with `/auth/login` appended. Concatenate
        // rather than resolve against the URL root so a path-bearing base
        // (`http://host/api`) keeps its prefix.
        let endpoint = Url::parse(&format!("{}/auth/login", api_base.trim_end_matches('/')))
            .map_err(|e| SessionError::network(format!("invalid API base URL: {e}")))?;
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl TokenVerifier for HttpVerifier {
    async fn verify(&self, token: &str) -> SessionResult<Verification> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| SessionError::network("token is not a valid header value"))?;
        headers.insert(AUTHORIZATION, bearer);
        let resp = self.client.get(self.endpoint.clone()).headers(headers).send().await?;
        // The body alone decides; the authority reports rejection in-band
        // rather than via status codes.
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| SessionError::network(format!("verification response was not JSON: {e}")))?;
        interpret(&body)
    }
}

fn interpret(body: &serde_json::Value) -> SessionResult<Verification> {
    match body.get("success") {
        Some(serde_json::Value::Bool(false)) => Ok(Verification { valid: false, api_key: None }),
        Some(serde_json::Value::String(key)) => {
            Ok(Verification { valid: true, api_key: Some(key.clone()) })
        }
        _ => Err(SessionError::network(format!("unexpected verification response: {body}"))),
    }
}
