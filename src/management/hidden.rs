use std::path::PathBuf;

use crate::{config, error::StoreError};

use super::{read_json, write_json};

/// Artists the user never wants suggested for following.
///
/// Stored as a JSON array of artist ids in `<data dir>/sparcli/hidden.json`.
pub struct HiddenArtistsManager {
    ids: Vec<String>,
    path: PathBuf,
}

impl HiddenArtistsManager {
    pub async fn load() -> Result<Self, StoreError> {
        Self::load_from(Self::hidden_path()).await
    }

    /// Loads the list at `path`. A missing file yields an empty list.
    pub async fn load_from(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                ids: Vec::new(),
                path,
            });
        }

        let ids: Vec<String> = read_json(&path).await?;
        Ok(Self { ids, path })
    }

    pub async fn persist(&self) -> Result<(), StoreError> {
        write_json(&self.path, &self.ids).await
    }

    /// Returns `true` if the id was not hidden before.
    pub fn hide(&mut self, artist_id: &str) -> bool {
        if self.contains(artist_id) {
            return false;
        }
        self.ids.push(artist_id.to_string());
        true
    }

    /// Returns `true` if the id was hidden before.
    pub fn unhide(&mut self, artist_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != artist_id);
        before != self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, artist_id: &str) -> bool {
        self.ids.iter().any(|id| id == artist_id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    fn hidden_path() -> PathBuf {
        config::data_dir().join("hidden.json")
    }
}
