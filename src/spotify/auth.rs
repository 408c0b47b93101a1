use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    config,
    error::{AuthError, ConfigError},
    server::start_api_server,
    types::{PkceToken, Token},
    utils, warning,
};

/// Maximum time to wait for Spotify to redirect back to the callback server.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_token(self, previous_refresh_token: Option<&str>) -> Result<Token, AuthError> {
        let access_token = self
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingField("access_token"))?;

        // Spotify may omit the refresh token on refresh, the old one stays valid then
        let refresh_token = self
            .refresh_token
            .filter(|t| !t.is_empty())
            .or_else(|| previous_refresh_token.map(str::to_string))
            .ok_or(AuthError::MissingField("refresh_token"))?;

        Ok(Token {
            access_token,
            refresh_token,
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

/// Runs the OAuth 2.0 PKCE authorization flow with Spotify.
///
/// 1. Generates the code verifier and its S256 challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the browser
/// 4. Waits up to 60 seconds for the callback to deliver a token
///
/// The caller decides what to do with the token, usually persisting it with
/// [`crate::management::TokenManager`].
///
/// # Errors
///
/// Fails when the OAuth configuration is incomplete. A timeout is reported as
/// `Ok(None)`.
pub async fn authorize(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
) -> Result<Option<Token>, AuthError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = authorize_url(
        &config::spotify_apiauth_url(),
        &config::spotify_client_id()?,
        &config::spotify_redirect_uri()?,
        &code_challenge,
        &config::spotify_scope(),
    )?;
    let addr = config::server_addr()?;

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(addr, server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    Ok(wait_for_token(shared_state, CALLBACK_TIMEOUT).await)
}

/// Builds the Spotify authorization URL for a PKCE request.
pub fn authorize_url(
    base: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> Result<String, ConfigError> {
    let url = Url::parse_with_params(
        base,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope),
        ],
    )
    .map_err(|e| ConfigError::Invalid {
        name: "SPOTIFY_API_AUTH_URL",
        reason: e.to_string(),
    })?;

    Ok(url.to_string())
}

async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    max_wait: Duration,
) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new access token.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, AuthError> {
    let client_id = config::spotify_client_id()?;

    let response = request_token(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id.as_str()),
    ])
    .await?;

    response.into_token(Some(refresh_token))
}

/// Exchanges the authorization code received on the callback for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, AuthError> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let response = request_token(&[
        ("grant_type", "authorization_code"),
        ("client_id", client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", redirect_uri.as_str()),
    ])
    .await?;

    response.into_token(None)
}

async fn request_token(form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
    let url = config::spotify_apitoken_url();
    debug!(url = %url, "Requesting Spotify token");

    let res = Client::new().post(&url).form(form).send().await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(AuthError::Rejected { status, body });
    }

    Ok(res.json::<TokenResponse>().await?)
}
