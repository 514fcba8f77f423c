//! Shopino storefront client core.
//!
//! ARCHITECTURE
//! ============
//! The storefront talks to an external backend (the remote authority) for
//! everything that matters. This crate owns the client side of that
//! relationship: one shared [`SessionState`] that every UI surface consults,
//! the HTTP client for the authority, and the small view-models the header
//! and profile panel render from.

pub mod authority;
pub mod catalog;
pub mod forms;
pub mod profile;
pub mod session;

pub use authority::config::AuthorityConfig;
pub use authority::types::{AuthError, User};
pub use authority::{Authority, AuthorityClient};
pub use session::store::{FileStore, MemoryStore, SessionStore, StoreError};
pub use session::{SessionState, SessionStatus};
