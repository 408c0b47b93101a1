//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by Sparcli. It
//! handles authentication and the artist related endpoints, and turns HTTP
//! failures into typed errors.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     └── Artist Client (Following, Playlists, Details)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - Implements the OAuth 2.0 PKCE flow:
//! - **Complete Auth Flow**: Verifier/challenge generation, browser launch, local callback
//! - **Token Exchange**: Authorization code and refresh token grants
//!
//! ### Artist Client
//!
//! [`client`] - [`ArtistClient`] owns a bearer token and offers four operations:
//! - **Followed Artists**: Paginated retrieval of every followed artist
//! - **Playlist Artists**: Fan-out over the user's playlists, deduplication of the
//!   track artists and batched detail resolution (50 ids per request)
//! - **Follow / Unfollow**: Single state changing requests
//!
//! ## Error Handling
//!
//! All client operations return [`crate::error::SpotifyError`]:
//! - **`Unauthorized`** - 401, the user has to sign in again
//! - **`RequestFailed`** - any other non-2xx status with its status text
//! - **`Transport`** - network failures and undecodable bodies
//!
//! Pagination aborts on the first failure. The playlist fan-out skips playlists
//! and detail batches that fail so one broken playlist never blocks the rest.
//!
//! ## Request Model
//!
//! Requests are strictly sequential, each one awaited before the next is sent.
//! There are no retries and no caching, every call goes to Spotify again.
//!
//! ## API Coverage
//!
//! - `GET /me/following` - Followed artists with pagination
//! - `GET /me/playlists` - The user's playlists (first page)
//! - `GET /playlists/{id}/tracks` - Tracks of a playlist
//! - `GET /artists` - Batch artist details
//! - `PUT /me/following` - Follow an artist
//! - `DELETE /me/following` - Unfollow an artist
//! - `POST /api/token` - Token exchange and refresh operations

pub mod auth;
pub mod client;

pub use client::ArtistClient;
