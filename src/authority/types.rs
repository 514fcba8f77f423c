//! Authority wire DTOs and the error taxonomy.
//!
//! Field names follow the backend's JSON exactly (`_id`, `userId`), so the
//! serde attributes here are the contract.

use serde::{Deserialize, Serialize};

use crate::session::store::StoreError;

/// Shown to the user when the authority gave no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Authentication failed";
/// Shown when the sign-in worked but could not be saved locally.
pub const STORE_ERROR_MESSAGE: &str = "Your session could not be saved on this device";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by authority calls and the session operations built on them.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The request could not complete (connect failure, timeout, dropped body).
    #[error("request failed: {0}")]
    Network(String),

    /// The authority answered but refused (non-2xx or `success: false`).
    #[error("authority rejected request: status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The response did not have the expected shape.
    #[error("malformed authority response: {0}")]
    Malformed(String),

    /// Form input failed local validation; nothing was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// Persisted session storage could not be read or written.
    #[error("session storage failed: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// Text suitable for showing next to a sign-in form.
    ///
    /// The authority's own message wins; anything else gets the generic text.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message: Some(message), .. } if !message.trim().is_empty() => message,
            Self::InvalidInput(message) => message,
            Self::Store(_) => STORE_ERROR_MESSAGE,
            _ => FALLBACK_ERROR_MESSAGE,
        }
    }

    /// Whether this error means the authority actively refused the credential,
    /// as opposed to the exchange failing.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

// =============================================================================
// USER
// =============================================================================

/// Profile snapshot of an authenticated user.
///
/// Persisted under the `user` storage key with the same field names the
/// backend uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserWire")]
pub struct User {
    /// Backend identifier. check-auth does not always include it.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Incoming user shape. Documents may carry `_id`, a virtual `id`, or both.
#[derive(Deserialize)]
struct UserWire {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    username: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        Self { id: wire.object_id.or(wire.id), username: wire.username, email: wire.email, phone: wire.phone }
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Profile fields echoed back by login/register under `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A freshly minted credential from login or register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub user_id: Option<String>,
    pub profile: ProfileData,
}

impl Credentials {
    /// Build the user to cache, taking any field the authority left out from
    /// what the visitor typed.
    #[must_use]
    pub fn user_with_fallback(&self, typed: &User) -> User {
        let pick = |from_authority: &Option<String>, typed: &Option<String>| {
            non_empty(from_authority.as_deref()).or_else(|| non_empty(typed.as_deref()))
        };
        User {
            id: self.user_id.clone().or_else(|| typed.id.clone()),
            username: non_empty(self.profile.username.as_deref()).unwrap_or_else(|| typed.username.clone()),
            email: pick(&self.profile.email, &typed.email),
            phone: pick(&self.profile.phone, &typed.phone),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Raw login/register success body.
#[derive(Debug, Deserialize)]
pub(crate) struct CredentialsResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub data: Option<ProfileData>,
}

impl TryFrom<CredentialsResponse> for Credentials {
    type Error = AuthError;

    fn try_from(raw: CredentialsResponse) -> Result<Self, Self::Error> {
        let token = raw
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::Malformed("missing token".into()))?;
        Ok(Self { token, user_id: raw.user_id, profile: raw.data.unwrap_or_default() })
    }
}

/// Raw `GET /api/check-auth` body.
#[derive(Debug, Deserialize)]
pub(crate) struct CheckAuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the authority sends with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
