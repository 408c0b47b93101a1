//! # API Module
//!
//! HTTP endpoints served by the temporary local server that runs while
//! `sparcli auth` waits for Spotify to redirect back.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code, exchanges it together with
//!   the PKCE verifier for an access token and hands the token to the waiting
//!   auth flow through the shared state.
//! - [`health`] - Reports `ok` and the application version, handy to check that
//!   the redirect URI points at the right address.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokio::sync::Mutex;
//!
//! let state = Arc::new(Mutex::new(None));
//! let app = sparcli::server::router(state);
//! ```
//!
//! ## Related Modules
//!
//! - [`crate::server`] - Binds the router to `SERVER_ADDRESS`
//! - [`crate::spotify::auth`] - Token exchange and the waiting auth flow

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
