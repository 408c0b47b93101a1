use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::{api, types::PkceToken};

/// Builds the router of the local OAuth callback server.
pub fn router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the callback router on `addr` until the process exits.
pub async fn start_api_server(
    addr: SocketAddr,
    state: Arc<Mutex<Option<PkceToken>>>,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    debug!(%addr, "Callback server listening");
    axum::serve(listener, router(state)).await
}
