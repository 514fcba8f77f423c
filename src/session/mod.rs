//! Session state for the current storefront visitor.
//!
//! SYSTEM CONTEXT
//! ==============
//! The header, mobile menu, and profile panel all need to know who is signed
//! in. They share one [`SessionState`] handle (cheap to clone) instead of each
//! reading storage and calling check-auth on their own.
//!
//! TRUST MODEL
//! ===========
//! A persisted token is untrusted until the authority confirms it in this
//! process. Anything uncertain renders as signed out: `Unknown` and `Invalid`
//! both report `is_authenticated() == false`.
//!
//! STALE RESULTS
//! =============
//! Every mutation advances an epoch. A check-auth answer is applied only if
//! the epoch it was issued under is still current, so a slow validation can
//! never undo a later login or logout.

pub mod store;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::watch;

use crate::authority::Authority;
use crate::authority::types::{AuthError, Credentials, User};
use crate::forms::{LoginForm, RegisterForm};
use store::{SessionStore, StoreError, TOKEN_KEY, USER_KEY};

// =============================================================================
// STATUS
// =============================================================================

/// Authentication status as the UI should see it.
///
/// Only `Authenticated` carries a user, so "user present iff authenticated"
/// holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// A stored token is awaiting validation.
    Unknown,
    /// Nobody is signed in.
    Anonymous,
    /// The authority confirmed (or just minted) the credential.
    Authenticated(User),
    /// Validation failed; storage is being cleared. Never a resting state.
    Invalid,
}

impl SessionStatus {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Anonymous => "anonymous",
            Self::Authenticated(_) => "authenticated",
            Self::Invalid => "invalid",
        }
    }
}

// =============================================================================
// SESSION STATE
// =============================================================================

type Validation = Shared<BoxFuture<'static, SessionStatus>>;

struct Core {
    epoch: u64,
    initialized: bool,
    in_flight: Option<Validation>,
    token: Option<String>,
}

struct Inner {
    authority: Arc<dyn Authority>,
    store: Arc<dyn SessionStore>,
    validate_timeout: Duration,
    status: watch::Sender<SessionStatus>,
    core: Mutex<Core>,
}

/// Shared handle to the visitor's session. Clones observe the same state.
#[derive(Clone)]
pub struct SessionState {
    inner: Arc<Inner>,
}

impl SessionState {
    /// Create an uninitialized session in the `Unknown` state.
    #[must_use]
    pub fn new(authority: Arc<dyn Authority>, store: Arc<dyn SessionStore>, validate_timeout: Duration) -> Self {
        let (status, _) = watch::channel(SessionStatus::Unknown);
        let core = Core { epoch: 0, initialized: false, in_flight: None, token: None };
        Self { inner: Arc::new(Inner { authority, store, validate_timeout, status, core: Mutex::new(core) }) }
    }

    /// Current status snapshot.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.inner.status.borrow().clone()
    }

    /// The signed-in user, if the session is authenticated.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.status.borrow().user().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.status.borrow().is_authenticated()
    }

    /// Receiver that wakes on every status change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.inner.status.subscribe()
    }

    /// Hydrate from storage and revalidate against the authority.
    ///
    /// Without a stored token this settles at `Anonymous` with no network
    /// call. Concurrent callers share one check-auth request; once a
    /// validation has completed, later calls return the current status.
    pub async fn initialize(&self) -> SessionStatus {
        let validation = {
            let mut core = self.inner.lock_core();
            if let Some(in_flight) = &core.in_flight {
                in_flight.clone()
            } else if core.initialized {
                return self.status();
            } else {
                match self.inner.read_token() {
                    None => {
                        core.initialized = true;
                        self.inner.remove_key(USER_KEY);
                        self.inner.publish(SessionStatus::Anonymous);
                        return SessionStatus::Anonymous;
                    }
                    Some(token) => {
                        core.epoch += 1;
                        core.token = Some(token.clone());
                        self.inner.publish(SessionStatus::Unknown);
                        let validation = self.validation(token, core.epoch);
                        core.in_flight = Some(validation.clone());
                        validation
                    }
                }
            }
        };
        validation.await
    }

    /// Run [`SessionState::initialize`] in the background.
    pub fn spawn_initialize(&self) -> tokio::task::JoinHandle<SessionStatus> {
        let session = self.clone();
        tokio::spawn(async move { session.initialize().await })
    }

    /// Record a credential the authority just minted.
    ///
    /// The session is `Authenticated` as soon as this returns, even when
    /// persisting fails.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if the token or user could not be
    /// persisted; the sign-in then only lasts for this process.
    pub fn commit_login(&self, token: &str, user: User) -> Result<(), AuthError> {
        let mut core = self.inner.lock_core();
        core.epoch += 1;
        core.initialized = true;
        core.in_flight = None;
        core.token = Some(token.to_owned());

        let persisted = self.inner.persist(token, &user);
        tracing::info!(username = %user.username, "session committed");
        self.inner.publish(SessionStatus::Authenticated(user));
        persisted.map_err(AuthError::from)
    }

    /// Sign out. Local state is cleared before the authority is contacted, and
    /// a failed remote logout is logged and otherwise ignored.
    pub async fn logout(&self) {
        let token = {
            let mut core = self.inner.lock_core();
            core.epoch += 1;
            core.initialized = true;
            core.in_flight = None;
            let token = core.token.take().or_else(|| self.inner.read_token());
            self.inner.clear_storage();
            self.inner.publish(SessionStatus::Anonymous);
            token
        };

        let Some(token) = token else {
            return;
        };
        match self.inner.authority.logout(&token).await {
            Ok(()) => tracing::info!("remote logout acknowledged"),
            Err(e) => tracing::warn!(error = %e, "remote logout failed; local session already cleared"),
        }
    }

    /// Sign in with an email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] without contacting the authority if
    /// the form is incomplete, or the authority's error if it refuses. The
    /// session is unchanged on error. A sign-in that could not be persisted
    /// still succeeds and is logged.
    pub async fn login(&self, form: &LoginForm) -> Result<User, AuthError> {
        let request = form.to_request()?;
        let credentials = self.inner.authority.login(&request).await.inspect_err(|e| {
            tracing::warn!(error = %e, "login failed");
        })?;
        Ok(self.commit_minted(&credentials, &form.typed_user()))
    }

    /// Create an account and sign in with it.
    ///
    /// # Errors
    ///
    /// Same as [`SessionState::login`].
    pub async fn register(&self, form: &RegisterForm) -> Result<User, AuthError> {
        let request = form.to_request()?;
        let credentials = self.inner.authority.register(&request).await.inspect_err(|e| {
            tracing::warn!(error = %e, "registration failed");
        })?;
        Ok(self.commit_minted(&credentials, &form.typed_user()))
    }

    fn commit_minted(&self, credentials: &Credentials, typed: &User) -> User {
        let user = credentials.user_with_fallback(typed);
        if let Err(e) = self.commit_login(&credentials.token, user.clone()) {
            tracing::warn!(error = %e, "signed in for this process only; session not saved");
        }
        user
    }

    fn validation(&self, token: String, epoch: u64) -> Validation {
        let authority = Arc::clone(&self.inner.authority);
        let timeout = self.inner.validate_timeout;
        let session: Weak<Inner> = Arc::downgrade(&self.inner);
        async move {
            let outcome = check_with_timeout(authority.as_ref(), &token, timeout).await;
            match session.upgrade() {
                Some(inner) => inner.apply_validation(epoch, outcome),
                None => SessionStatus::Anonymous,
            }
        }
        .boxed()
        .shared()
    }
}

async fn check_with_timeout(
    authority: &dyn Authority,
    token: &str,
    timeout: Duration,
) -> Result<Option<User>, AuthError> {
    tracing::debug!("validating stored session");
    match tokio::time::timeout(timeout, authority.check_auth(token)).await {
        Ok(result) => result,
        Err(_) => Err(AuthError::Network(format!("check-auth timed out after {}ms", timeout.as_millis()))),
    }
}

impl Inner {
    fn lock_core(&self) -> MutexGuard<'_, Core> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, status: SessionStatus) {
        tracing::info!(status = status.label(), "session status");
        self.status.send_replace(status);
    }

    fn apply_validation(&self, epoch: u64, outcome: Result<Option<User>, AuthError>) -> SessionStatus {
        let mut core = self.lock_core();
        if core.epoch != epoch {
            tracing::debug!(epoch, current = core.epoch, "discarding stale validation");
            return self.status.borrow().clone();
        }
        core.in_flight = None;
        core.initialized = true;

        match outcome.and_then(|user| self.resolve_user(user)) {
            Ok(user) => {
                if let Err(e) = self.write_user(&user) {
                    tracing::warn!(error = %e, "failed to cache validated user");
                }
                let status = SessionStatus::Authenticated(user);
                self.publish(status.clone());
                status
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored session rejected; clearing");
                core.token = None;
                self.publish(SessionStatus::Invalid);
                self.clear_storage();
                self.publish(SessionStatus::Anonymous);
                SessionStatus::Anonymous
            }
        }
    }

    /// The authority's user wins; the persisted copy only fills in when the
    /// authority confirmed the token without sending one.
    fn resolve_user(&self, from_authority: Option<User>) -> Result<User, AuthError> {
        if let Some(user) = from_authority {
            return Ok(user);
        }
        self.read_user()
            .ok_or_else(|| AuthError::Malformed("check-auth succeeded without a user".into()))
    }

    fn read_token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored token; treating as signed out");
                None
            }
        }
    }

    fn read_user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    fn write_user(&self, user: &User) -> Result<(), StoreError> {
        let raw = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &raw)
    }

    fn persist(&self, token: &str, user: &User) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token)?;
        self.write_user(user)
    }

    fn remove_key(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::warn!(error = %e, key, "failed to clear stored session key");
        }
    }

    fn clear_storage(&self) {
        self.remove_key(TOKEN_KEY);
        self.remove_key(USER_KEY);
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
