//! # CLI Module
//!
//! This module provides the command-line interface layer for Sparcli. It
//! implements all user-facing commands and coordinates between the Spotify
//! client, the local stores and the terminal.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Signs in with the Spotify OAuth PKCE flow
//! - [`logout`] - Discards the stored token
//!
//! ### Artist Listings
//!
//! - [`followed`] - Artists the user follows
//! - [`playlist_artists`] - Distinct artists found in the user's playlists
//! - [`reconcile`] - Playlist artists that are neither followed nor hidden
//!
//! ### Changes
//!
//! - [`follow`] / [`unfollow`] - Follow or unfollow artists by id
//! - [`hide`] / [`unhide`] - Keep artists out of the reconcile list
//!
//! ## Error Presentation
//!
//! A 401 from Spotify means the session is over. The stored token is removed
//! and the user is told to run `sparcli auth` again. Every other failure is
//! printed as a plain error and the process exits with status 1.
//!
//! ## Usage Patterns
//!
//! ```bash
//! sparcli auth                      # Authenticate with Spotify
//! sparcli reconcile                 # What could I follow?
//! sparcli follow 4Z8W4fKeB5YxbusRsdQVPb
//! sparcli followed --search radio   # Find specific followed artists
//! sparcli hide 0OdUWJ0sBjDrqHygGUXeCF
//! ```

mod artists;
mod auth;
mod follow;
mod hidden;

pub use artists::followed;
pub use artists::playlist_artists;
pub use artists::reconcile;
pub use auth::auth;
pub use auth::logout;
pub use follow::follow;
pub use follow::unfollow;
pub use hidden::hide;
pub use hidden::unhide;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, error,
    error::SpotifyError,
    management::TokenManager,
    spotify::ArtistClient,
    types::{AccessToken, Artist},
    utils, warning,
};

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Builds a client from the stored token, refreshing it when needed.
async fn artist_client() -> ArtistClient {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run sparcli auth\n Error: {}",
                e
            );
        }
    };

    let token = match AccessToken::new(token_mgr.get_valid_token().await) {
        Ok(token) => token,
        Err(e) => error!("Stored token is unusable. Please run sparcli auth\n Error: {}", e),
    };

    match ArtistClient::new(token, config::spotify_apiurl()) {
        Ok(client) => client,
        Err(e) => error!("Failed to create Spotify client. Err: {}", e),
    }
}

/// Prints a failed Spotify call and exits.
///
/// An unauthorized response signs the user out first.
async fn fail(action: &str, err: &SpotifyError) {
    if err.is_unauthorized() {
        if let Err(e) = TokenManager::clear_stored().await {
            warning!("Failed to remove stored token: {}", e);
        }
        error!("Spotify session expired or was revoked. Please run sparcli auth");
    }

    error!("Failed to {}. Err: {}", action, err);
}

fn print_artists(artists: &[Artist], json: bool) {
    if json {
        match serde_json::to_string_pretty(artists) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Failed to serialize artists. Err: {}", e),
        }
        return;
    }

    let table = Table::new(utils::artist_table_rows(artists));
    println!("{}", table);
}
