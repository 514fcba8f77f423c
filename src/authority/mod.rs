//! HTTP client for the storefront backend's auth endpoints.
//!
//! DESIGN
//! ======
//! [`Authority`] is the seam the session talks through so tests can swap in a
//! scripted backend. [`AuthorityClient`] is the real reqwest implementation.
//! Every call maps onto one of three outcomes the session cares about:
//! network failure, rejection, or a malformed body.

pub mod config;
pub mod types;

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use config::AuthorityConfig;
use types::{
    AuthError, CheckAuthResponse, Credentials, CredentialsResponse, ErrorBody, LoginRequest, RegisterRequest, User,
};

// =============================================================================
// AUTHORITY TRAIT
// =============================================================================

/// The remote authority's auth contract. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Authority: Send + Sync {
    /// `POST /api/login`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with the authority's message on a
    /// non-2xx answer, or a network/malformed error.
    async fn login(&self, request: &LoginRequest) -> Result<Credentials, AuthError>;

    /// `POST /api/register`.
    ///
    /// # Errors
    ///
    /// Same as [`Authority::login`].
    async fn register(&self, request: &RegisterRequest) -> Result<Credentials, AuthError>;

    /// `GET /api/check-auth` with the token as a bearer credential.
    ///
    /// Returns the authority's view of the user when it reports the token as
    /// valid. The user may be absent even on success.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] for a non-2xx status or
    /// `success: false`, otherwise a network/malformed error.
    async fn check_auth(&self, token: &str) -> Result<Option<User>, AuthError>;

    /// `POST /api/logout` with the token as a bearer credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not 2xx.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct AuthorityClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthorityClient {
    /// Build a client from typed config.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ClientBuild`] if reqwest cannot build its client.
    pub fn new(config: &AuthorityConfig) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| AuthError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_credentials(&self, path: &str, body: &impl Serialize) -> Result<Credentials, AuthError> {
        tracing::debug!(%path, "authority request");
        let response = self
            .http
            .post(self.url(path))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let raw: CredentialsResponse = read_json(response).await?;
        Credentials::try_from(raw)
    }
}

#[async_trait::async_trait]
impl Authority for AuthorityClient {
    async fn login(&self, request: &LoginRequest) -> Result<Credentials, AuthError> {
        self.post_credentials("/api/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Credentials, AuthError> {
        self.post_credentials("/api/register", request).await
    }

    async fn check_auth(&self, token: &str) -> Result<Option<User>, AuthError> {
        tracing::debug!(path = "/api/check-auth", "authority request");
        let response = self
            .http
            .get(self.url("/api/check-auth"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let body: CheckAuthResponse = read_json(response).await?;
        if !body.success {
            return Err(AuthError::Rejected { status: StatusCode::OK.as_u16(), message: body.message });
        }
        Ok(body.user)
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        tracing::debug!(path = "/api/logout", "authority request");
        let response = self
            .http
            .post(self.url("/api/logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }
}

/// Decode a 2xx JSON body, or turn a non-2xx answer into a rejection.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AuthError> {
    if !response.status().is_success() {
        return Err(rejection(response).await);
    }
    let text = response.text().await.map_err(|e| AuthError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| AuthError::Malformed(e.to_string()))
}

async fn rejection(response: reqwest::Response) -> AuthError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body).unwrap_or_default().message;
    AuthError::Rejected { status, message }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
