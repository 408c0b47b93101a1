mod auth;
mod hidden;

pub use auth::TokenManager;
pub use hidden::HiddenArtistsManager;

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StoreError;

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = async_fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(value)?;
    async_fs::write(path, json).await?;
    Ok(())
}
