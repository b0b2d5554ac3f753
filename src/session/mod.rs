//! Session subsystem: store, durable persistence, remote verification and
//! route guarding. Keep the public surface thin and split implementation
//! across sub-modules.

mod guard;
mod profile;
mod store;
mod vault;
mod verifier;

pub use guard::{evaluate, GuardDecision};
pub use profile::{build_user, SessionRecord, UserProfile};
pub use store::{SessionState, SessionStore};
pub use vault::{SessionVault, TOKEN_ENTRY, USER_ENTRY};
pub use verifier::{HttpVerifier, TokenVerifier, Verification};
