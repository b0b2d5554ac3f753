//! The session store: single source of truth for authentication state.
//!
//! Constructed once at application start and handed to whichever part of
//! the UI tree needs it. State transitions are published as whole
//! snapshots under one write-lock hold, so concurrent readers never
//! observe a half-written {token, user, is_authenticated} triple. A call
//! in flight cannot be cancelled; when two overlap, the one that
//! completes last wins.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::profile::{build_user, SessionRecord, UserProfile};
use super::vault::SessionVault;
use super::verifier::{HttpVerifier, TokenVerifier, Verification};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::token::decode_claims;

/// Snapshot of authentication state as the UI consumes it.
/// `is_authenticated` holds iff `user` and `token` are both set and the
/// last verification, if one was performed, succeeded.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct SessionStore {
    state: RwLock<SessionState>,
    vault: SessionVault,
    verifier: Option<Arc<dyn TokenVerifier>>,
}

impl SessionStore {
    /// A `None` verifier selects the local-only variant: persisted and
    /// freshly decoded sessions are trusted without asking a backend.
    pub fn new(vault: SessionVault, verifier: Option<Arc<dyn TokenVerifier>>) -> Self {
        Self { state: RwLock::new(SessionState::default()), vault, verifier }
    }

    pub fn from_config(cfg: &SessionConfig) -> SessionResult<Self> {
        let verifier: Option<Arc<dyn TokenVerifier>> = match &cfg.api_base {
            Some(base) => Some(Arc::new(HttpVerifier::new(base, cfg.verify_timeout)?)),
            None => None,
        };
        Ok(Self::new(SessionVault::new(cfg.data_dir.clone()), verifier))
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.read().user.clone()
    }

    /// Exchange a Google credential for a session. On failure the previous
    /// authenticated fields are left untouched; only `error` is set — a
    /// failed *new* login does not log out an existing session.
    pub async fn login_with_google(&self, credential: &str) -> SessionResult<UserProfile> {
        {
            let mut st = self.state.write();
            st.is_loading = true;
            st.error = None;
        }
        match self.login_inner(credential).await {
            Ok(user) => {
                {
                    let mut st = self.state.write();
                    *st = SessionState {
                        user: Some(user.clone()),
                        token: Some(credential.to_string()),
                        is_authenticated: true,
                        is_loading: false,
                        error: None,
                    };
                }
                info!("auth.login user={}", user.id);
                Ok(user)
            }
            Err(e) => {
                {
                    let mut st = self.state.write();
                    st.is_loading = false;
                    st.error = Some(format!("could not sign in with Google: {e}"));
                }
                warn!("auth.login failed: {}", e);
                Err(e)
            }
        }
    }

    async fn login_inner(&self, credential: &str) -> SessionResult<UserProfile> {
        // Ask the authority first, then decode; a rejected token is not
        // worth parsing.
        let verification: Option<Verification> = match &self.verifier {
            Some(v) => {
                let out = v.verify(credential).await?;
                if !out.valid {
                    return Err(SessionError::Rejected);
                }
                Some(out)
            }
            None => None,
        };
        let claims = decode_claims(credential)?;
        let user = build_user(claims, verification.as_ref());
        self.vault.persist(&SessionRecord { token: credential.to_string(), user: user.clone() })?;
        Ok(user)
    }

    /// End the session: durable entries removed, state reset. Idempotent.
    pub fn logout(&self) {
        self.vault.clear();
        let mut st = self.state.write();
        st.user = None;
        st.token = None;
        st.is_authenticated = false;
        info!("auth.logout");
    }

    /// Re-validate the persisted session. Called at app bootstrap and on
    /// every protected-route mount; each call is independent and safe to
    /// repeat. Empty storage is a plain `false` with no network call.
    /// With a verifier configured the policy is fail-closed: rejection or
    /// an unreachable authority destroys the session.
    pub async fn check_auth(&self) -> bool {
        let Some(record) = self.vault.read() else {
            return false;
        };
        let Some(verifier) = &self.verifier else {
            self.publish_session(record.user, record.token);
            return true;
        };
        match verifier.verify(&record.token).await {
            Ok(v) if v.valid => {
                let mut user = record.user;
                if let Some(key) = v.api_key {
                    if user.api_key.as_deref() != Some(key.as_str()) {
                        debug!("auth.check apiKey refreshed for user={}", user.id);
                        user.api_key = Some(key);
                        let refreshed =
                            SessionRecord { token: record.token.clone(), user: user.clone() };
                        if let Err(e) = self.vault.persist(&refreshed) {
                            warn!("could not persist refreshed apiKey: {}", e);
                        }
                    }
                }
                self.publish_session(user, record.token);
                true
            }
            Ok(_) => {
                info!("auth.check token rejected, signing out");
                self.logout();
                false
            }
            Err(e) => {
                warn!("auth.check verification unavailable, signing out: {}", e);
                self.logout();
                false
            }
        }
    }

    fn publish_session(&self, user: UserProfile, token: String) {
        let mut st = self.state.write();
        st.user = Some(user);
        st.token = Some(token);
        st.is_authenticated = true;
    }
}
