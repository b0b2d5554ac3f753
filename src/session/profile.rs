use serde::{Deserialize, Serialize};

use super::verifier::Verification;
use crate::token::IdClaims;

/// The signed-in user as the rest of the product sees it. Serialized with
/// camelCase names to keep the stored `user_data` shape stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// The durable pair representing a logged-in user. Persisted and read as a
/// unit; a record with only one half present does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: String,
    pub user: UserProfile,
}

/// Assemble a profile from decoded claims. `api_key` is populated only when
/// the verification authority issued one.
pub fn build_user(claims: IdClaims, verification: Option<&Verification>) -> UserProfile {
    UserProfile {
        id: claims.sub,
        name: claims.name.unwrap_or_default(),
        email: claims.email.unwrap_or_default(),
        picture: claims.picture,
        api_key: verification.and_then(|v| v.api_key.clone()),
    }
}
