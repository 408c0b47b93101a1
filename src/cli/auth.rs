use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, management::TokenManager, spotify, success, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let token = match spotify::auth::authorize(shared_state).await {
        Ok(Some(token)) => token,
        Ok(None) => error!("Authentication failed or timed out."),
        Err(e) => error!("Authentication failed. Err: {}", e),
    };

    let token_manager = TokenManager::new(token);
    if let Err(e) = token_manager.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}

pub async fn logout() {
    if let Err(e) = TokenManager::clear_stored().await {
        error!("Failed to remove stored token. Err: {}", e);
    }

    success!("Signed out.");
}
