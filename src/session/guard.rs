//! Route-guard decision for protected pages: re-validate on entry, admit
//! or send back to sign-in. The rendering side (spinner, redirect) lives
//! with the UI.

use super::store::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Admit,
    RedirectToSignIn,
}

pub async fn evaluate(store: &SessionStore) -> GuardDecision {
    if store.check_auth().await {
        GuardDecision::Admit
    } else {
        GuardDecision::RedirectToSignIn
    }
}
