//! Sign-in and session core for the DevTime developer time-tracking
//! dashboard. Takes the credential handed over by the Google sign-in
//! widget, optionally confirms it with the DevTime backend, keeps the
//! durable session record, and answers the route guard's "may I render
//! this page" question. UI composition and routing live elsewhere.

pub mod config;
pub mod error;
pub mod session;
pub mod token;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use session::{GuardDecision, SessionStore, UserProfile};
